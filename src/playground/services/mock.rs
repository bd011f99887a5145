//! # Mock Transform Client
//!
//! A [`TransformClient`] that replays scripted outcomes and records every
//! request it receives, for driving the pipeline without a network.

use super::transform::{TransformClient, TransformError, TransformRequest, TransformResponse};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted reply: wait `delay`, then resolve with `outcome`
#[derive(Debug)]
pub struct ScriptedReply {
    pub delay: Duration,
    pub outcome: Result<TransformResponse, TransformError>,
}

/// Client that answers from a queue of scripted replies
///
/// Clones share the same script and request log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransformClient {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    requests: Arc<Mutex<Vec<TransformRequest>>>,
}

impl ScriptedTransformClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn respond(&self, content_type: &str, body: &str) -> &Self {
        self.respond_after(Duration::ZERO, content_type, body)
    }

    /// Queue a successful reply that arrives after `delay`
    pub fn respond_after(&self, delay: Duration, content_type: &str, body: &str) -> &Self {
        self.push(ScriptedReply {
            delay,
            outcome: Ok(TransformResponse::new(content_type, body)),
        })
    }

    /// Queue a failed reply
    pub fn fail(&self, error: TransformError) -> &Self {
        self.push(ScriptedReply {
            delay: Duration::ZERO,
            outcome: Err(error),
        })
    }

    pub fn push(&self, reply: ScriptedReply) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Every request sent so far, in call order
    pub fn requests(&self) -> Vec<TransformRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl TransformClient for ScriptedTransformClient {
    fn send(
        &self,
        request: TransformRequest,
    ) -> impl Future<Output = Result<TransformResponse, TransformError>> + Send {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();

        async move {
            let Some(reply) = reply else {
                return Err(TransformError::protocol("no scripted reply left"));
            };
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            reply.outcome
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_client_should_replay_in_order_and_record_requests() {
        let client = ScriptedTransformClient::new();
        client
            .respond("application/json", "{}")
            .fail(TransformError::protocol("boom"));

        let first = client.send(TransformRequest::new("t1", "i1")).await;
        let second = client.send(TransformRequest::new("t2", "i2")).await;
        let third = client.send(TransformRequest::new("t3", "i3")).await;

        assert_eq!(first.unwrap(), TransformResponse::new("application/json", "{}"));
        assert!(matches!(second, Err(TransformError::Protocol(_))));
        assert!(matches!(third, Err(TransformError::Protocol(_))));
        assert_eq!(client.call_count(), 3);
        assert_eq!(client.requests()[1].template, "t2");
    }
}
