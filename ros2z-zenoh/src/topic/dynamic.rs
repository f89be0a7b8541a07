//! Dynamically-typed publisher and subscriber.
//!
//! [`Publisher<T>`](super::Publisher)/[`Subscriber<T>`](super::Subscriber)
//! need a generated `TypeSupport` at compile time. These two don't: they
//! take a fully-qualified type name, resolve its schema through the
//! node's [`TypeRegistry`](crate::TypeRegistry) on construction, and encode
//! or decode [`DynamicMessage`] values against it with
//! [`ros2_types::cdr_dynamic`]. Everything else — key-expression layout,
//! liveliness tokens, the attachment protocol, transient-local replay —
//! is identical to the static endpoints.

use crate::{
    attachment::{Attachment, GID_SIZE, generate_gid},
    error::{Error, Result},
    keyexpr::{
        EntityKind, advanced_publisher_replay_selector, liveliness_entity_keyexpr,
        liveliness_publisher_discovery_selector, ros2_to_dds_type, topic_keyexpr,
        zenoh_id_from_liveliness_keyexpr,
    },
    node::Node,
    qos::QosMapping,
    topic::subscriber::TRANSIENT_LOCAL_QUERY_TIMEOUT,
};
use ros2_types::cdr_dynamic;
use ros2_types::{DynamicMessage, MessageBuilder, MessageSchema, TypeStore};
use ros2z_core::qos::Profile;
use parking_lot::Mutex;
use std::sync::Arc;
use zenoh::{Wait, bytes::ZBytes};

/// Publishes [`DynamicMessage`] instances of a runtime-resolved type.
///
/// # Example
///
/// ```ignore
/// let publisher = node.create_dynamic_publisher("std_msgs/msg/String", "chatter", None)?;
/// let msg = publisher.builder().set("data", Value::Str("Hello!".into()))?.build()?;
/// publisher.send(msg)?;
/// ```
pub struct DynamicPublisher {
    node: Arc<Node>,
    type_name: String,
    schema: Arc<MessageSchema>,
    store: Arc<TypeStore>,
    topic_name: String,
    fq_topic_name: String,
    zenoh_publisher: zenoh::pubsub::Publisher<'static>,
    gid: [u8; GID_SIZE],
    sequence_number: Mutex<i64>,
    _liveliness_token: zenoh::liveliness::LivelinessToken,
}

impl DynamicPublisher {
    /// Resolve `type_name`, declare the data publisher, and announce it
    /// with node and publisher liveliness tokens.
    pub(crate) fn new(
        node: Arc<Node>,
        type_name: &str,
        topic_name: &str,
        qos: Profile,
        entity_kind: EntityKind,
    ) -> Result<Self> {
        QosMapping::validate(&qos);

        let registry = node.context().type_registry().clone();
        let schema = registry.resolve(type_name)?;
        let store = registry.store().clone();
        let type_hash = registry.type_hash(type_name)?;
        let dds_type = ros2_to_dds_type(type_name);

        let fq_topic_name = if topic_name.starts_with('/') {
            topic_name.to_string()
        } else if node.namespace().is_empty() {
            format!("/{topic_name}")
        } else {
            format!("{}/{}", node.namespace(), topic_name)
        };

        let key_expr_str = topic_keyexpr(
            node.context().domain_id(),
            &fq_topic_name,
            &dds_type,
            &type_hash,
        );

        let session = node.context().session();
        let key_expr = zenoh::key_expr::KeyExpr::try_from(key_expr_str)?;
        let mut builder = session.declare_publisher(key_expr);
        builder = builder.congestion_control(QosMapping::congestion_control(&qos));
        let zenoh_publisher = builder.wait()?;

        let gid = generate_gid();
        let entity_id = node.allocate_entity_id();

        let token_key = liveliness_entity_keyexpr(
            node.context().domain_id(),
            node.context().session_id(),
            node.node_id(),
            entity_id,
            entity_kind,
            node.enclave(),
            node.namespace(),
            node.name(),
            &fq_topic_name,
            &dds_type,
            &type_hash,
            &qos,
        );
        let liveliness_token = session.liveliness().declare_token(&token_key).wait()?;

        Ok(Self {
            node,
            type_name: type_name.to_string(),
            schema,
            store,
            topic_name: topic_name.to_string(),
            fq_topic_name,
            zenoh_publisher,
            gid,
            sequence_number: Mutex::new(0),
            _liveliness_token: liveliness_token,
        })
    }

    /// The resolved type name this publisher was constructed with.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Start building an instance of this publisher's message type.
    pub fn builder(&self) -> MessageBuilder<'_> {
        MessageBuilder::new(self.type_name.clone(), &self.schema, &self.store)
    }

    /// The topic name as given at construction.
    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    /// The fully qualified topic name.
    pub fn fq_topic_name(&self) -> &str {
        &self.fq_topic_name
    }

    /// The publisher GID.
    pub fn gid(&self) -> &[u8; GID_SIZE] {
        &self.gid
    }

    /// Encode `msg` to CDR, attach `(seq, timestamp_ns, gid)`, and put it.
    ///
    /// # Errors
    ///
    /// Returns an error if `msg` doesn't match this publisher's type or the
    /// Zenoh put fails.
    pub fn send(&self, msg: DynamicMessage) -> Result<()> {
        if msg.type_name != self.type_name {
            return Err(Error::SchemaParseError(format!(
                "message type {} does not match publisher type {}",
                msg.type_name, self.type_name
            )));
        }

        let payload = cdr_dynamic::encode(&msg, &self.store)?;

        let seq = {
            let mut seq = self.sequence_number.lock();
            let current = *seq;
            *seq += 1;
            current
        };

        let attachment = Attachment::new(seq, self.gid);
        self.zenoh_publisher
            .put(payload)
            .encoding("application/cdr")
            .attachment(ZBytes::from(attachment.to_bytes().to_vec()))
            .wait()?;
        Ok(())
    }

    /// The parent node.
    pub fn node(&self) -> &Arc<Node> {
        &self.node
    }
}

/// A message decoded by a [`DynamicSubscriber`], with its attachment.
#[derive(Debug)]
pub struct ReceivedDynamicMessage {
    /// The decoded message.
    pub data: DynamicMessage,
    /// Sequence number, timestamp, and publisher GID, if the sample carried
    /// one.
    pub attachment: Option<Attachment>,
}

/// Receives [`DynamicMessage`] instances of a runtime-resolved type.
pub struct DynamicSubscriber {
    node: Arc<Node>,
    type_name: String,
    store: Arc<TypeStore>,
    topic_name: String,
    fq_topic_name: String,
    gid: [u8; GID_SIZE],
    receiver: flume::Receiver<(Vec<u8>, Option<Vec<u8>>)>,
    _liveliness_token: zenoh::liveliness::LivelinessToken,
    _zenoh_subscriber: zenoh::pubsub::Subscriber<()>,
}

impl DynamicSubscriber {
    /// Resolve `type_name`, declare the data subscriber, announce it, and
    /// (for `transient_local` durability) replay peer publisher history.
    pub(crate) fn new(
        node: Arc<Node>,
        type_name: &str,
        topic_name: &str,
        qos: Profile,
        entity_kind: EntityKind,
    ) -> Result<Self> {
        QosMapping::validate(&qos);

        let registry = node.context().type_registry().clone();
        registry.resolve(type_name)?;
        let store = registry.store().clone();
        let type_hash = registry.type_hash(type_name)?;
        let dds_type = ros2_to_dds_type(type_name);

        let fq_topic_name = if topic_name.starts_with('/') {
            topic_name.to_string()
        } else if node.namespace().is_empty() {
            format!("/{topic_name}")
        } else {
            format!("{}/{}", node.namespace(), topic_name)
        };

        let key_expr = topic_keyexpr(
            node.context().domain_id(),
            &fq_topic_name,
            &dds_type,
            "*",
        );

        let depth = QosMapping::effective_depth(&qos);
        let (sender, receiver) = flume::bounded(depth);

        let session = node.context().session();
        let replay_sender = sender.clone();
        let zenoh_subscriber = session
            .declare_subscriber(&key_expr)
            .callback(move |sample| {
                let payload: Vec<u8> = sample.payload().to_bytes().to_vec();
                let attachment = sample.attachment().map(|a| a.to_bytes().to_vec());
                let _ = sender.try_send((payload, attachment));
            })
            .wait()?;

        let gid = generate_gid();
        let entity_id = node.allocate_entity_id();

        let token_key = liveliness_entity_keyexpr(
            node.context().domain_id(),
            node.context().session_id(),
            node.node_id(),
            entity_id,
            entity_kind,
            node.enclave(),
            node.namespace(),
            node.name(),
            &fq_topic_name,
            &dds_type,
            &type_hash,
            &qos,
        );
        let liveliness_token = session.liveliness().declare_token(&token_key).wait()?;

        if QosMapping::is_transient_local(&qos) {
            let history_depth = QosMapping::effective_depth(&qos);
            Self::replay_transient_local(
                &node,
                &fq_topic_name,
                &dds_type,
                &type_hash,
                history_depth,
                &replay_sender,
            );
        }

        Ok(Self {
            node,
            type_name: type_name.to_string(),
            store,
            topic_name: topic_name.to_string(),
            fq_topic_name,
            gid,
            receiver,
            _liveliness_token: liveliness_token,
            _zenoh_subscriber: zenoh_subscriber,
        })
    }

    fn replay_transient_local(
        node: &Arc<Node>,
        fq_topic_name: &str,
        dds_type: &str,
        type_hash: &str,
        history_depth: usize,
        sender: &flume::Sender<(Vec<u8>, Option<Vec<u8>>)>,
    ) {
        let session = node.context().session();
        let domain_id = node.context().domain_id();

        let discovery_selector =
            liveliness_publisher_discovery_selector(domain_id, fq_topic_name, dds_type, type_hash);

        let replies = match session
            .liveliness()
            .get(&discovery_selector)
            .timeout(TRANSIENT_LOCAL_QUERY_TIMEOUT)
            .wait()
        {
            Ok(replies) => replies,
            Err(e) => {
                tracing::error!(error = %e, "transient-local publisher discovery failed");
                return;
            }
        };

        let mut zenoh_ids = std::collections::HashSet::new();
        while let Ok(reply) = replies.recv() {
            if let Ok(sample) = reply.result()
                && let Some(id) = zenoh_id_from_liveliness_keyexpr(sample.key_expr().as_str())
            {
                zenoh_ids.insert(id.to_string());
            }
        }

        if zenoh_ids.is_empty() {
            return;
        }

        let data_keyexpr = topic_keyexpr(domain_id, fq_topic_name, dds_type, type_hash);

        for zenoh_id in zenoh_ids {
            let replay_selector =
                advanced_publisher_replay_selector(&data_keyexpr, &zenoh_id, history_depth);

            let replies = match session
                .get(&replay_selector)
                .timeout(TRANSIENT_LOCAL_QUERY_TIMEOUT)
                .wait()
            {
                Ok(replies) => replies,
                Err(e) => {
                    tracing::error!(error = %e, zenoh_id, "transient-local replay query failed");
                    continue;
                }
            };

            while let Ok(reply) = replies.recv() {
                if let Ok(sample) = reply.result() {
                    let payload = sample.payload().to_bytes().to_vec();
                    let attachment = sample.attachment().map(|a| a.to_bytes().to_vec());
                    let _ = sender.try_send((payload, attachment));
                }
            }
        }
    }

    /// The resolved type name this subscriber was constructed with.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The topic name as given at construction.
    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    /// The fully qualified topic name.
    pub fn fq_topic_name(&self) -> &str {
        &self.fq_topic_name
    }

    /// The subscriber GID.
    pub fn gid(&self) -> &[u8; GID_SIZE] {
        &self.gid
    }

    /// Receive the next message, decoding against the resolved schema.
    ///
    /// A payload that fails to decode is logged and dropped, matching
    /// [`super::Subscriber::recv`] — a malformed peer must not crash the
    /// subscriber.
    pub async fn recv(&mut self) -> Result<ReceivedDynamicMessage> {
        loop {
            let (payload, attachment_bytes) = self
                .receiver
                .recv_async()
                .await
                .map_err(|_| Error::ChannelClosed)?;

            match cdr_dynamic::decode(&self.type_name, &self.store, &payload) {
                Ok(data) => {
                    let attachment =
                        attachment_bytes.and_then(|bytes| Attachment::from_bytes(&bytes).ok());
                    return Ok(ReceivedDynamicMessage { data, attachment });
                }
                Err(e) => {
                    tracing::error!(error = %e, topic = %self.fq_topic_name, "failed to decode message, dropping");
                }
            }
        }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&mut self) -> Result<Option<ReceivedDynamicMessage>> {
        loop {
            match self.receiver.try_recv() {
                Ok((payload, attachment_bytes)) => {
                    match cdr_dynamic::decode(&self.type_name, &self.store, &payload) {
                        Ok(data) => {
                            let attachment = attachment_bytes
                                .and_then(|bytes| Attachment::from_bytes(&bytes).ok());
                            return Ok(Some(ReceivedDynamicMessage { data, attachment }));
                        }
                        Err(e) => {
                            tracing::error!(error = %e, topic = %self.fq_topic_name, "failed to decode message, dropping");
                        }
                    }
                }
                Err(flume::TryRecvError::Empty) => return Ok(None),
                Err(flume::TryRecvError::Disconnected) => return Err(Error::ChannelClosed),
            }
        }
    }

    /// The parent node.
    pub fn node(&self) -> &Arc<Node> {
        &self.node
    }
}
