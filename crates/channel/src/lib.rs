//! Named bidirectional method-call conduit between a view adapter and its
//! hosting framework.
//!
//! One [`MethodChannel`] exists per view instance. Outbound traffic
//! (widget events) goes through [`MethodChannel::invoke`] and is
//! fire-and-forget; inbound traffic (remote commands) is delivered to the
//! handler registered for the channel's name and answered synchronously
//! with a [`MethodResult`].
//!
//! Everything here is single-threaded: handlers run to completion on the
//! host UI thread before the next call is dispatched, so there are no
//! locks and no queues, just plain `Rc`/`RefCell` ownership.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A structured call travelling inbound over a channel.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub args: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }
}

/// Synchronous answer to an inbound [`MethodCall`].
#[derive(Clone, Debug, PartialEq)]
pub enum MethodResult {
    Success(Value),
    Error {
        code: String,
        message: String,
        details: Value,
    },
    /// The receiver does not recognize the method.
    NotImplemented,
}

impl MethodResult {
    /// Success with no payload.
    pub fn ok() -> Self {
        Self::Success(Value::Null)
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
            details: Value::Null,
        }
    }
}

/// Callback answering inbound calls on one channel.
pub type MethodHandler = Rc<dyn Fn(&MethodCall) -> MethodResult>;

/// The transport supplied by the hosting framework.
///
/// Implementations route outbound invocations to the remote side and keep
/// the per-channel handler registry the remote side dispatches into.
pub trait Messenger {
    /// Fire-and-forget outbound invocation on a named channel.
    fn invoke(&self, channel: &str, method: &str, args: &Value);

    /// Register (`Some`) or detach (`None`) the handler for a channel.
    fn set_handler(&self, channel: &str, handler: Option<MethodHandler>);
}

/// A named conduit bound to a shared [`Messenger`].
pub struct MethodChannel {
    name: String,
    messenger: Rc<dyn Messenger>,
}

impl MethodChannel {
    pub fn new(messenger: Rc<dyn Messenger>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messenger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send an event to the remote side.
    pub fn invoke(&self, method: &str, args: Value) {
        log::trace!(target: "channel", "{} -> {method}", self.name);
        self.messenger.invoke(&self.name, method, &args);
    }

    /// Bind or detach this channel's inbound handler.
    pub fn set_handler(&self, handler: Option<MethodHandler>) {
        self.messenger.set_handler(&self.name, handler);
    }
}

/// An invocation that left through a messenger, as the remote side sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundCall {
    pub channel: String,
    pub method: String,
    pub args: Value,
}

/// In-memory transport for embeddings that marshal calls themselves, and
/// for tests: records outbound traffic and dispatches inbound calls
/// synchronously to the registered handler.
#[derive(Default)]
pub struct InProcessMessenger {
    handlers: RefCell<HashMap<String, MethodHandler>>,
    sent: RefCell<Vec<OutboundCall>>,
}

impl InProcessMessenger {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Deliver an inbound call to the channel's handler, if any.
    pub fn dispatch(&self, channel: &str, call: &MethodCall) -> MethodResult {
        // Clone the handler out so dispatch can re-enter the messenger
        // (handlers invoke outbound events while they run).
        let handler = self.handlers.borrow().get(channel).cloned();
        match handler {
            Some(handler) => handler(call),
            None => MethodResult::NotImplemented,
        }
    }

    pub fn has_handler(&self, channel: &str) -> bool {
        self.handlers.borrow().contains_key(channel)
    }

    /// Snapshot of everything invoked so far, oldest first.
    pub fn sent(&self) -> Vec<OutboundCall> {
        self.sent.borrow().clone()
    }

    /// Drain the recorded outbound traffic.
    pub fn take_sent(&self) -> Vec<OutboundCall> {
        std::mem::take(&mut *self.sent.borrow_mut())
    }
}

impl Messenger for InProcessMessenger {
    fn invoke(&self, channel: &str, method: &str, args: &Value) {
        self.sent.borrow_mut().push(OutboundCall {
            channel: channel.to_string(),
            method: method.to_string(),
            args: args.clone(),
        });
    }

    fn set_handler(&self, channel: &str, handler: Option<MethodHandler>) {
        match handler {
            Some(handler) => {
                self.handlers.borrow_mut().insert(channel.to_string(), handler);
            }
            None => {
                self.handlers.borrow_mut().remove(channel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dispatch_reaches_registered_handler() {
        let messenger = InProcessMessenger::new();
        let channel = MethodChannel::new(messenger.clone(), "view_1");
        channel.set_handler(Some(Rc::new(|call| {
            assert_eq!(call.method, "ping");
            MethodResult::Success(json!("pong"))
        })));

        let result = messenger.dispatch("view_1", &MethodCall::new("ping", Value::Null));
        assert_eq!(result, MethodResult::Success(json!("pong")));
    }

    #[test]
    fn dispatch_without_handler_is_not_implemented() {
        let messenger = InProcessMessenger::new();
        let result = messenger.dispatch("nobody", &MethodCall::new("ping", Value::Null));
        assert_eq!(result, MethodResult::NotImplemented);
    }

    #[test]
    fn detached_handler_stops_receiving() {
        let messenger = InProcessMessenger::new();
        let channel = MethodChannel::new(messenger.clone(), "view_1");
        channel.set_handler(Some(Rc::new(|_| MethodResult::ok())));
        assert!(messenger.has_handler("view_1"));

        channel.set_handler(None);
        assert!(!messenger.has_handler("view_1"));
        let result = messenger.dispatch("view_1", &MethodCall::new("ping", Value::Null));
        assert_eq!(result, MethodResult::NotImplemented);
    }

    #[test]
    fn outbound_calls_are_recorded_in_order() {
        let messenger = InProcessMessenger::new();
        let channel = MethodChannel::new(messenger.clone(), "view_7");
        channel.invoke("updateFocus", json!(true));
        channel.invoke("updateHeight", json!(80.0));

        let sent = messenger.take_sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].channel, "view_7");
        assert_eq!(sent[0].method, "updateFocus");
        assert_eq!(sent[0].args, json!(true));
        assert_eq!(sent[1].method, "updateHeight");
        assert!(messenger.take_sent().is_empty());
    }

    #[test]
    fn handler_may_invoke_outbound_while_handling() {
        let messenger = InProcessMessenger::new();
        let channel = Rc::new(MethodChannel::new(messenger.clone(), "view_1"));
        let for_handler = channel.clone();
        channel.set_handler(Some(Rc::new(move |_| {
            for_handler.invoke("updateValue", json!({"text": "x"}));
            MethodResult::ok()
        })));

        let result = messenger.dispatch("view_1", &MethodCall::new("setText", json!("x")));
        assert_eq!(result, MethodResult::ok());
        assert_eq!(messenger.sent().len(), 1);
    }
}
