//! Event selector for Zenoh-based ROS2 operations.
//!
//! Provides a unified way to wait on multiple ROS2 entities (subscribers, servers, timers)
//! and dispatch callbacks when events occur.

use crate::{
    error::Result, parameter::ParameterStore, service::server::Server,
    topic::subscriber::{ReceivedMessage, Subscriber},
};
use ros2z_core::{TypeSupport, parameter::Parameters};
use std::{
    collections::{BTreeSet, HashMap},
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

/// Timer ID counter.
static TIMER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A timer entry.
struct Timer {
    period: Duration,
    next_fire: Instant,
    handler: Box<dyn FnMut()>,
    /// If true, the timer fires once and is removed.
    one_shot: bool,
}

/// Callback type for parameter store updates.
type ParameterServerCallback = Box<dyn FnMut(&mut Parameters, BTreeSet<String>)>;

/// Callback type for service server requests.
type ServerCallback<T> =
    Box<dyn FnMut(<T as ros2z_core::ServiceMsg>::Request) -> <T as ros2z_core::ServiceMsg>::Response>;

/// Event selector for Zenoh operations.
///
/// The Selector allows you to wait on multiple entities and receive callbacks
/// when events occur. This is the primary mechanism for single-threaded
/// event-driven ROS2 applications.
///
/// # Example
///
/// ```ignore
/// // Create a context.
/// let ctx = Context::new().unwrap();
///
/// let mut selector = ctx.create_selector().unwrap();
/// // Add a subscriber
/// selector.add_subscriber(subscriber, Box::new(|msg| {
///     println!("Received: {:?}", msg);
/// }));
///
/// // Add a timer
/// selector.add_timer(Duration::from_secs(1), Box::new(|| {
///     println!("Timer fired!");
/// }));
///
/// // Main loop
/// loop {
///     selector.wait()?;
/// }
/// ```
pub struct Selector {
    /// Subscriber handlers that poll and process messages.
    subscriber_handlers: Vec<Box<dyn FnMut() -> bool>>,
    /// Server handlers that poll and process requests.
    server_handlers: Vec<Box<dyn FnMut() -> bool>>,
    /// Parameter server handler (only one per Selector).
    parameter_server_handler: Option<Box<dyn FnMut() -> bool>>,
    /// Timers with their next fire time.
    timers: HashMap<u64, Timer>,
}

impl Selector {
    /// Create a new selector.
    pub(crate) fn new() -> Self {
        Self {
            subscriber_handlers: Vec::new(),
            server_handlers: Vec::new(),
            parameter_server_handler: None,
            timers: HashMap::new(),
        }
    }

    /// Add a subscriber with a callback handler.
    ///
    /// The handler will be called whenever a message arrives on the topic.
    pub fn add_subscriber<T: TypeSupport + 'static>(
        &mut self,
        subscriber: Subscriber<T>,
        mut handler: Box<dyn FnMut(ReceivedMessage<T>)>,
    ) -> bool {
        // Create a closure that tries to receive and call the handler
        let poll_fn = Box::new(move || -> bool {
            match subscriber.try_recv() {
                Ok(Some(msg)) => {
                    handler(msg);
                    true
                }
                _ => false,
            }
        });
        self.subscriber_handlers.push(poll_fn);
        true
    }

    /// Add a service server to the selector.
    ///
    /// The handler receives the request message and returns a response.
    /// Incoming requests are polled during `wait()` calls.
    ///
    /// Returns true if the server was added successfully.
    pub fn add_server<T: ros2z_core::ServiceMsg + 'static>(
        &mut self,
        mut server: crate::service::Server<T>,
        mut handler: ServerCallback<T>,
    ) -> bool
    where
        T::Request: ros2z_core::TypeSupport,
        T::Response: ros2z_core::TypeSupport,
    {
        // Create a closure that tries to receive and call the handler
        let poll_fn = Box::new(move || -> bool {
            match server.try_recv() {
                Ok(Some(service_req)) => {
                    let (request, sender) = service_req.split();
                    // A panicking handler must not crash the queryable: convert it
                    // into an error reply, matching the non-Rust reference's
                    // "handler exceptions propagate into an error reply" policy.
                    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        handler(request)
                    })) {
                        Ok(response) => {
                            if let Err(e) = sender.send(response) {
                                tracing::error!(error = %e, "failed to send service response");
                            }
                        }
                        Err(payload) => {
                            let message = payload
                                .downcast_ref::<&str>()
                                .map(|s| s.to_string())
                                .or_else(|| payload.downcast_ref::<String>().cloned())
                                .unwrap_or_else(|| "service handler panicked".to_string());
                            tracing::error!(error = %message, "service handler panicked");
                            if let Err(e) = sender.send_err(message) {
                                tracing::error!(error = %e, "failed to send error reply");
                            }
                        }
                    }
                    true
                }
                Ok(None) => false,
                Err(e) => {
                    tracing::error!(error = %e, "failed to receive service request");
                    false
                }
            }
        });
        self.server_handlers.push(poll_fn);
        true
    }

    /// Watch a parameter store, invoking `handler` whenever parameters change.
    ///
    /// `ParameterStore` has no wire protocol to poll (see its module docs); this
    /// just checks [`Parameters::take_updated`] on every `wait()` iteration, so
    /// the handler sees whatever an application thread wrote via
    /// [`ParameterStore::write`].
    ///
    /// Only one store can be watched per Selector. Calling this again replaces
    /// the previous one.
    pub fn add_parameter_server(&mut self, store: ParameterStore, mut handler: ParameterServerCallback) {
        let handle = store.handle();

        let poll_fn = Box::new(move || -> bool {
            let mut guard = handle.write();
            let updated = guard.take_updated();
            let changed = !updated.is_empty();
            if changed {
                handler(&mut guard, updated);
            }
            changed
        });

        self.parameter_server_handler = Some(poll_fn);
    }

    /// Add a one-shot timer that fires once after the given duration.
    ///
    /// Returns a timer ID that can be used to remove the timer before it fires.
    pub fn add_timer(&mut self, duration: Duration, handler: Box<dyn FnMut()>) -> u64 {
        let id = TIMER_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let timer = Timer {
            period: duration,
            next_fire: Instant::now() + duration,
            handler,
            one_shot: true,
        };
        self.timers.insert(id, timer);
        id
    }

    /// Add a wall timer that fires periodically.
    ///
    /// The timer will fire repeatedly at the given period until removed.
    ///
    /// Returns a timer ID that can be used to remove the timer.
    pub fn add_wall_timer(
        &mut self,
        _name: &str,
        period: Duration,
        handler: Box<dyn FnMut()>,
    ) -> u64 {
        let id = TIMER_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let timer = Timer {
            period,
            next_fire: Instant::now() + period,
            handler,
            one_shot: false,
        };
        self.timers.insert(id, timer);
        id
    }

    /// Remove a timer by ID.
    pub fn remove_timer(&mut self, id: u64) {
        self.timers.remove(&id);
    }

    /// Wait for events indefinitely.
    pub fn wait(&mut self) -> Result<()> {
        self.wait_timeout_internal(None)
    }

    /// Wait for events with a timeout.
    ///
    /// Returns `Ok(true)` if events were processed, `Ok(false)` if timeout occurred.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<bool> {
        self.wait_timeout_internal(Some(timeout)).map(|_| true)
    }

    fn wait_timeout_internal(&mut self, timeout: Option<Duration>) -> Result<()> {
        let start = Instant::now();
        let deadline = timeout.map(|t| start + t);
        let poll_interval = Duration::from_millis(10);

        loop {
            // Poll all subscribers
            for handler in &mut self.subscriber_handlers {
                handler();
            }

            // Poll all service servers
            for handler in &mut self.server_handlers {
                handler();
            }

            // Poll parameter server
            if let Some(ref mut handler) = self.parameter_server_handler {
                handler();
            }

            // Process expired timers
            let now = Instant::now();
            let mut timers_to_remove = Vec::new();
            for (&id, timer) in self.timers.iter_mut() {
                if now >= timer.next_fire {
                    (timer.handler)();
                    if timer.one_shot {
                        // One-shot timer: mark for removal
                        timers_to_remove.push(id);
                    } else {
                        // Periodic timer: reschedule
                        timer.next_fire = now + timer.period;
                    }
                }
            }
            // Remove fired one-shot timers
            for id in timers_to_remove {
                self.timers.remove(&id);
            }

            // Check if we've exceeded the timeout
            if let Some(d) = deadline
                && Instant::now() >= d
            {
                break;
            }

            // Calculate sleep time
            let next_timer = self.timers.values().map(|t| t.next_fire).min();
            let sleep_until = match (deadline, next_timer) {
                (Some(d), Some(t)) => Some(d.min(t)),
                (Some(d), None) => Some(d),
                (None, Some(t)) => Some(t),
                (None, None) => None,
            };

            let sleep_time = sleep_until
                .map(|s| s.saturating_duration_since(Instant::now()))
                .map(|d| d.min(poll_interval))
                .unwrap_or(poll_interval);

            if sleep_time > Duration::ZERO {
                std::thread::sleep(sleep_time);
            }

            // For indefinite wait with no timers, break after one iteration
            // to avoid infinite busy-loop when there's nothing to do
            if deadline.is_none() && self.timers.is_empty() && self.subscriber_handlers.is_empty() {
                break;
            }
        }

        Ok(())
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

