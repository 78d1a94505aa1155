use super::session::Session;
use pb_dto::ApiError;
use pb_dto::Reply;
use pb_dto::Request;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

/// A request paired with the channel its reply goes back on.
#[derive(Debug)]
pub struct Envelope {
    pub request: Request,
    pub reply: oneshot::Sender<Result<Reply, ApiError>>,
}

/// Runs a Session in its own async task.
///
/// The actor drains its inbox one envelope at a time, so two operations on
/// the same session can never interleave: callers see some total order.
/// An `End` request answers, then stops the task and drops the session.
pub struct Actor {
    session: Session,
    inbox: UnboundedReceiver<Envelope>,
}

impl Actor {
    /// Spawns the session's task and returns its inbox handle.
    pub fn spawn(session: Session) -> UnboundedSender<Envelope> {
        let (tx, rx) = unbounded_channel();
        let actor = Self { session, inbox: rx };
        tokio::spawn(actor.run());
        tx
    }

    async fn run(mut self) {
        log::debug!("[session {}] actor started", self.session.id());
        while let Some(envelope) = self.inbox.recv().await {
            let ending = matches!(envelope.request, Request::End);
            let result = self.session.handle(envelope.request);
            let _ = envelope.reply.send(result);
            if ending {
                break;
            }
        }
        log::debug!("[session {}] actor stopped", self.session.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_dto::Mode;
    use pb_dto::StartSession;

    fn session(mode: Mode) -> Session {
        Session::start(StartSession {
            mode,
            bankroll: 10_000.0,
            rules: None,
            betting: None,
            seed: Some(7),
        })
        .unwrap()
    }

    async fn call(
        sender: &UnboundedSender<Envelope>,
        request: Request,
    ) -> Result<Reply, ApiError> {
        let (tx, rx) = oneshot::channel();
        sender
            .send(Envelope { request, reply: tx })
            .expect("actor alive");
        rx.await.expect("actor replies")
    }

    #[tokio::test]
    async fn answers_requests() {
        let sender = Actor::spawn(session(Mode::Manual));
        match call(&sender, Request::Status).await.unwrap() {
            Reply::Status { state, .. } => assert_eq!(state, "idle"),
            reply => panic!("expected Status, got {:?}", reply),
        }
    }

    #[tokio::test]
    async fn end_stops_the_actor() {
        let sender = Actor::spawn(session(Mode::Manual));
        assert_eq!(call(&sender, Request::End).await.unwrap(), Reply::Ended);
        tokio::task::yield_now().await;
        // the task is gone: either the inbox is already closed, or the
        // envelope is never answered
        let (tx, rx) = oneshot::channel();
        let sent = sender.send(Envelope {
            request: Request::Status,
            reply: tx,
        });
        if sent.is_ok() {
            assert!(rx.await.is_err());
        }
    }

    #[tokio::test]
    async fn operations_apply_in_arrival_order() {
        let sender = Actor::spawn(session(Mode::Manual));
        // queue a burst of observations without awaiting between sends
        let mut pending = Vec::new();
        for _ in 0..50 {
            let (tx, rx) = oneshot::channel();
            sender
                .send(Envelope {
                    request: Request::Observe {
                        cards: vec!["5h".into()],
                    },
                    reply: tx,
                })
                .unwrap();
            pending.push(rx);
        }
        let mut last = 0;
        for rx in pending {
            match rx.await.unwrap().unwrap() {
                Reply::Observed { count_snapshot, .. } => {
                    assert_eq!(count_snapshot.cards_dealt, last + 1);
                    last = count_snapshot.cards_dealt;
                }
                reply => panic!("expected Observed, got {:?}", reply),
            }
        }
        assert_eq!(last, 50);
    }
}
