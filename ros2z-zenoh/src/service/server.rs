//! Service server.
//!
//! # Reference
//!
//! See [rmw_zenoh design - Service Servers](https://github.com/ros2/rmw_zenoh/blob/rolling/docs/design.md#service-servers)

use crate::{
    attachment::{Attachment, GID_SIZE, generate_gid},
    error::{Error, Result},
    keyexpr::{EntityKind, liveliness_entity_keyexpr, topic_keyexpr},
    node::Node,
};
use ros2z_core::qos::Profile;
use ros2_types::TypeSupport;
use std::{marker::PhantomData, sync::Arc};
use zenoh::{Wait, bytes::ZBytes, query::Query};

/// Incoming service request with sender for response.
pub struct ServiceRequest<T: ros2z_core::ServiceMsg> {
    /// Request data.
    pub request: T::Request,
    /// Request attachment.
    pub attachment: Option<Attachment>,
    /// Sender for response.
    sender: ResponseSender<T>,
}

impl<T: ros2z_core::ServiceMsg> ServiceRequest<T>
where
    T::Response: TypeSupport,
{
    /// Send a response to this request.
    pub fn respond(self, response: T::Response) -> Result<()> {
        self.sender.send(response)
    }

    /// Split into the request payload and a standalone response sender.
    ///
    /// Useful when the request needs to be handed to a callback by value
    /// while the sender is kept around to reply afterwards.
    pub fn split(self) -> (T::Request, ResponseSender<T>) {
        (self.request, self.sender)
    }
}

/// Sender for a single service response, detached from its request.
pub struct ResponseSender<T: ros2z_core::ServiceMsg> {
    query: Query,
    client_gid: [u8; GID_SIZE],
    sequence_number: i64,
    _phantom: PhantomData<T>,
}

impl<T: ros2z_core::ServiceMsg> ResponseSender<T> {
    /// Reply with an error sample instead of a decoded response.
    ///
    /// Used when the handler panicked or otherwise failed to produce a
    /// response; the client observes this as a `reply_err`, never a hang
    /// or a crashed queryable.
    pub fn send_err(self, message: impl Into<String>) -> Result<()> {
        self.query
            .reply_err(message.into())
            .wait()
            .map_err(|e| Error::Zenoh(e.into()))
    }
}

impl<T: ros2z_core::ServiceMsg> ResponseSender<T>
where
    T::Response: TypeSupport,
{
    /// Send the response.
    pub fn send(self, response: T::Response) -> Result<()> {
        // Serialize response
        let payload = response.to_bytes()?;

        // Create response attachment (echo back client's seq and gid)
        let attachment = Attachment::new(self.sequence_number, self.client_gid);
        let attachment_bytes = attachment.to_bytes();

        // Reply to query
        self.query
            .reply(self.query.key_expr().clone(), payload)
            .encoding("application/cdr")
            .attachment(ZBytes::from(attachment_bytes.to_vec()))
            .wait()
            .map_err(|e| Error::Zenoh(e.into()))?;

        Ok(())
    }
}

/// Service server.
///
/// Receives requests and sends responses.
///
/// # Example
///
/// ```ignore
/// let mut server = node.create_server::<std_srvs::srv::Empty>("my_service", None)?;
///
/// loop {
///     let request = server.recv().await?;
///     let response = std_srvs::srv::Empty_Response {};
///     request.respond(response)?;
/// }
/// ```
pub struct Server<T: ros2z_core::ServiceMsg> {
    /// Parent node.
    node: Arc<Node>,
    /// Service name.
    service_name: String,
    /// Fully qualified service name.
    fq_service_name: String,
    /// Server GID.
    gid: [u8; GID_SIZE],
    /// Request receiver channel.
    receiver: flume::Receiver<(Query, Vec<u8>, Option<Vec<u8>>)>,
    /// Liveliness token.
    _liveliness_token: zenoh::liveliness::LivelinessToken,
    /// Zenoh queryable (kept alive).
    _queryable: zenoh::query::Queryable<()>,
    /// Phantom data for service type.
    _phantom: PhantomData<T>,
}

impl<T: ros2z_core::ServiceMsg> Server<T>
where
    T::Request: TypeSupport,
    T::Response: TypeSupport,
{
    /// Create a new service server.
    pub(crate) fn new(node: Arc<Node>, service_name: &str, qos: Profile) -> Result<Self> {
        // Expand (and remap) the fully qualified service name
        let fq_service_name =
            node.expand_and_remap_name(service_name, ros2args::names::NameKind::Topic)?;

        // Get type info
        let type_name = T::Request::type_name();
        let type_hash = T::type_hash()?;

        // Build key expression
        let key_expr = topic_keyexpr(
            node.context().domain_id(),
            &fq_service_name,
            type_name,
            &type_hash,
        );

        // Create channel for incoming requests
        let (sender, receiver) = flume::bounded(32);

        // Create Zenoh queryable
        let queryable = node
            .context()
            .session()
            .declare_queryable(&key_expr)
            .complete(true) // Service can answer all queries
            .callback(move |query| {
                // Extract payload
                let payload = query
                    .payload()
                    .map(|p| p.to_bytes().to_vec())
                    .unwrap_or_default();

                // Extract attachment
                let attachment = query.attachment().map(|a| a.to_bytes().to_vec());

                // Send to channel
                let _ = sender.try_send((query, payload, attachment));
            })
            .wait()?;

        // Generate server GID
        let gid = generate_gid();
        let entity_id = node.allocate_entity_id();

        // Create liveliness token
        let token_key = liveliness_entity_keyexpr(
            node.context().domain_id(),
            node.context().session_id(),
            node.node_id(),
            entity_id,
            EntityKind::ServiceServer,
            node.enclave(),
            node.namespace(),
            node.name(),
            &fq_service_name,
            type_name,
            &type_hash,
            &qos,
        );

        let liveliness_token = node
            .context()
            .session()
            .liveliness()
            .declare_token(&token_key)
            .wait()?;

        Ok(Server {
            node,
            service_name: service_name.to_string(),
            fq_service_name,
            gid,
            receiver,
            _liveliness_token: liveliness_token,
            _queryable: queryable,
            _phantom: PhantomData,
        })
    }

    /// Get the service name.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Get the fully qualified service name.
    pub fn fq_service_name(&self) -> &str {
        &self.fq_service_name
    }

    /// Get the server GID.
    pub fn gid(&self) -> &[u8; GID_SIZE] {
        &self.gid
    }

    /// Receive a request asynchronously.
    ///
    /// Returns a `ServiceRequest` that can be used to send a response.
    pub async fn recv(&mut self) -> Result<ServiceRequest<T>> {
        loop {
            let (query, payload, attachment_bytes) = self
                .receiver
                .recv_async()
                .await
                .map_err(|_| Error::ChannelClosed)?;

            if let Some(request) = Self::decode_query(query, payload, attachment_bytes) {
                return Ok(request);
            }
        }
    }

    /// Try to receive a request without blocking.
    ///
    /// Returns `None` if no request is queued. A malformed query (missing
    /// payload/attachment, or an undecodable request) is rejected with an
    /// error reply to the caller and polling continues.
    pub fn try_recv(&mut self) -> Result<Option<ServiceRequest<T>>> {
        loop {
            match self.receiver.try_recv() {
                Ok((query, payload, attachment_bytes)) => {
                    if let Some(request) = Self::decode_query(query, payload, attachment_bytes) {
                        return Ok(Some(request));
                    }
                }
                Err(flume::TryRecvError::Empty) => return Ok(None),
                Err(flume::TryRecvError::Disconnected) => return Err(Error::ChannelClosed),
            }
        }
    }

    /// Decode a raw query into a `ServiceRequest`, rejecting it with an
    /// error reply (and returning `None`) on any protocol violation.
    fn decode_query(
        query: Query,
        payload: Vec<u8>,
        attachment_bytes: Option<Vec<u8>>,
    ) -> Option<ServiceRequest<T>> {
        if payload.is_empty() {
            let _ = query.reply_err("service request has no payload").wait();
            return None;
        }
        let Some(attachment_bytes) = attachment_bytes else {
            let _ = query.reply_err("service request has no attachment").wait();
            return None;
        };

        let request = match T::Request::from_bytes(&payload) {
            Ok(request) => request,
            Err(e) => {
                let _ = query.reply_err(format!("{e}")).wait();
                return None;
            }
        };

        let attachment = Attachment::from_bytes(&attachment_bytes);
        let (sequence_number, client_gid) = attachment
            .as_ref()
            .map(|a| (a.sequence_number, a.gid))
            .unwrap_or((0, [0u8; GID_SIZE]));

        let sender = ResponseSender {
            query,
            client_gid,
            sequence_number,
            _phantom: PhantomData,
        };

        Some(ServiceRequest {
            request,
            attachment,
            sender,
        })
    }

    /// Get the parent node.
    pub fn node(&self) -> &Arc<Node> {
        &self.node
    }
}
