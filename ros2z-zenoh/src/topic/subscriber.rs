//! Topic subscriber.
//!
//! # Reference
//!
//! See [rmw_zenoh design - Subscriptions](https://github.com/ros2/rmw_zenoh/blob/rolling/docs/design.md#subscriptions)

use crate::{
    attachment::{Attachment, GID_SIZE, generate_gid},
    error::{Error, Result},
    keyexpr::{
        EntityKind, advanced_publisher_replay_selector, liveliness_entity_keyexpr,
        liveliness_publisher_discovery_selector, topic_keyexpr, zenoh_id_from_liveliness_keyexpr,
    },
    node::Node,
    qos::QosMapping,
};
use ros2z_core::qos::Profile;
use ros2_types::{TypeDescription, TypeSupport};
use std::{marker::PhantomData, sync::Arc, time::Duration};
use zenoh::Wait;

/// Timeout for the transient-local discovery and replay queries.
///
/// `rmw_zenoh` exposes this as a configurable parameter; we default to 2s,
/// matching the reference implementation.
pub const TRANSIENT_LOCAL_QUERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Received message with metadata.
#[derive(Debug)]
pub struct ReceivedMessage<T> {
    /// The message data.
    pub data: T,
    /// Message attachment (sequence number, timestamp, GID).
    pub attachment: Option<Attachment>,
}

/// Topic subscriber.
///
/// Receives messages from a topic using Zenoh.
///
/// # Example
///
/// ```ignore
/// let mut subscriber = node.create_subscriber::<std_msgs::msg::String>("chatter", None)?;
///
/// // Async receive
/// let msg = subscriber.recv().await?;
/// println!("Received: {}", msg.data.data);
///
/// // Non-blocking receive
/// if let Some(msg) = subscriber.try_recv()? {
///     println!("Received: {}", msg.data.data);
/// }
/// ```
pub struct Subscriber<T> {
    /// Parent node.
    node: Arc<Node>,
    /// Topic name.
    topic_name: String,
    /// Fully qualified topic name.
    fq_topic_name: String,
    /// Subscriber GID.
    gid: [u8; GID_SIZE],
    /// Message receiver channel.
    receiver: flume::Receiver<(Vec<u8>, Option<Vec<u8>>)>,
    /// Liveliness token.
    _liveliness_token: zenoh::liveliness::LivelinessToken,
    /// Zenoh subscriber (kept alive).
    _zenoh_subscriber: zenoh::pubsub::Subscriber<()>,
    /// Phantom data for type.
    _phantom: PhantomData<T>,
}

impl<T: TypeSupport + TypeDescription> Subscriber<T> {
    /// Create a new subscriber.
    ///
    /// # Arguments
    ///
    /// * `node` - Parent node
    /// * `topic_name` - Topic name (expanded against the node's namespace)
    /// * `qos` - QoS profile
    /// * `entity_kind` - Entity kind for liveliness
    pub(crate) fn new(
        node: Arc<Node>,
        topic_name: &str,
        qos: Profile,
        entity_kind: EntityKind,
    ) -> Result<Self> {
        // Validate QoS
        QosMapping::validate(&qos);

        // Expand (and remap) the fully qualified topic name
        let fq_topic_name = node.expand_and_remap_name(topic_name, ros2args::names::NameKind::Topic)?;

        // Get type info
        let type_name = T::type_name();
        let type_hash = T::compute_hash()?;

        // Build key expression with wildcard for type hash
        // This allows receiving from publishers with different (compatible) type hashes
        let key_expr = topic_keyexpr(
            node.context().domain_id(),
            &fq_topic_name,
            type_name,
            "*", // Wildcard to match any hash
        );

        // Create channel for received messages
        let depth = QosMapping::effective_depth(&qos);
        let (sender, receiver) = flume::bounded(depth);

        // Create Zenoh subscriber
        let session = node.context().session();
        let replay_sender = sender.clone();
        let zenoh_subscriber = session
            .declare_subscriber(&key_expr)
            .callback(move |sample| {
                // Extract payload
                let payload: Vec<u8> = sample.payload().to_bytes().to_vec();

                // Extract attachment if present
                let attachment = sample.attachment().map(|a| a.to_bytes().to_vec());

                // Send to channel (drop if full - KeepLast behavior)
                let _ = sender.try_send((payload, attachment));
            })
            .wait()?;

        // Generate subscriber GID
        let gid = generate_gid();
        let entity_id = node.allocate_entity_id();

        // Create liveliness token
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
            type_name,
            &type_hash,
            &qos,
        );

        let liveliness_token = session.liveliness().declare_token(&token_key).wait()?;

        // Transient-local replay: query peer AdvancedPublisher caches
        // for history that was published before this subscriber existed.
        if QosMapping::is_transient_local(&qos) {
            let history_depth = QosMapping::effective_depth(&qos);
            Self::replay_transient_local(
                &node,
                &fq_topic_name,
                type_name,
                &type_hash,
                history_depth,
                &replay_sender,
            );
        }

        Ok(Subscriber {
            node,
            topic_name: topic_name.to_string(),
            fq_topic_name,
            gid,
            receiver,
            _liveliness_token: liveliness_token,
            _zenoh_subscriber: zenoh_subscriber,
            _phantom: PhantomData,
        })
    }

    /// Discover peer publishers and replay their cached history.
    ///
    /// Runs two blocking Zenoh `get` rounds, each bounded by
    /// [`TRANSIENT_LOCAL_QUERY_TIMEOUT`]: a liveliness query to find which
    /// `zenoh_id`s currently publish this topic, then a history query
    /// against each publisher's `@adv/pub` cache. Failures here are
    /// non-fatal — a late joiner simply receives only live samples.
    fn replay_transient_local(
        node: &Arc<Node>,
        fq_topic_name: &str,
        type_name: &str,
        type_hash: &str,
        history_depth: usize,
        sender: &flume::Sender<(Vec<u8>, Option<Vec<u8>>)>,
    ) {
        let session = node.context().session();
        let domain_id = node.context().domain_id();

        let discovery_selector =
            liveliness_publisher_discovery_selector(domain_id, fq_topic_name, type_name, type_hash);

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

        let data_keyexpr = topic_keyexpr(domain_id, fq_topic_name, type_name, type_hash);

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
}

impl<T: TypeSupport> Subscriber<T> {
    /// Get the topic name.
    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    /// Get the fully qualified topic name.
    pub fn fq_topic_name(&self) -> &str {
        &self.fq_topic_name
    }

    /// Get the subscriber GID.
    pub fn gid(&self) -> &[u8; GID_SIZE] {
        &self.gid
    }

    /// Receive a message asynchronously.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the channel is closed.
    ///
    /// A payload that fails to decode (malformed peer) is logged and
    /// dropped rather than surfaced — it must not crash the subscriber.
    /// The next successfully-decoded sample is returned instead.
    pub async fn recv(&mut self) -> Result<ReceivedMessage<T>> {
        loop {
            let (payload, attachment_bytes) = self
                .receiver
                .recv_async()
                .await
                .map_err(|_| Error::ChannelClosed)?;

            match T::from_bytes(&payload) {
                Ok(data) => {
                    let attachment =
                        attachment_bytes.and_then(|bytes| Attachment::from_bytes(&bytes).ok());
                    return Ok(ReceivedMessage { data, attachment });
                }
                Err(e) => {
                    tracing::error!(error = %e, topic = %self.fq_topic_name, "failed to decode message, dropping");
                }
            }
        }
    }

    /// Try to receive a message without blocking.
    ///
    /// Returns `None` if no message is available. A payload that fails to
    /// decode is logged and dropped; polling continues to the next queued
    /// sample rather than surfacing the error.
    pub fn try_recv(&mut self) -> Result<Option<ReceivedMessage<T>>> {
        loop {
            match self.receiver.try_recv() {
                Ok((payload, attachment_bytes)) => match T::from_bytes(&payload) {
                    Ok(data) => {
                        let attachment =
                            attachment_bytes.and_then(|bytes| Attachment::from_bytes(&bytes).ok());
                        return Ok(Some(ReceivedMessage { data, attachment }));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, topic = %self.fq_topic_name, "failed to decode message, dropping");
                    }
                },
                Err(flume::TryRecvError::Empty) => return Ok(None),
                Err(flume::TryRecvError::Disconnected) => return Err(Error::ChannelClosed),
            }
        }
    }

    /// Get the parent node.
    pub fn node(&self) -> &Arc<Node> {
        &self.node
    }
}
