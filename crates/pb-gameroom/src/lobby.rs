use super::actor::Actor;
use super::actor::Envelope;
use super::session::Session;
use pb_core::ID;
use pb_dto::ApiError;
use pb_dto::Reply;
use pb_dto::Request;
use pb_dto::StartSession;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

/// Session registry: routes requests to session actors by id.
///
/// The lobby itself holds no game state, only channel handles. Sessions
/// never share mutable state with each other; the only synchronisation is
/// this handle map.
#[derive(Default)]
pub struct Lobby {
    sessions: Mutex<HashMap<ID<Session>, UnboundedSender<Envelope>>>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session, spawns its actor, and returns the `Started`
    /// reply (with the replay seed).
    pub fn start(&self, request: StartSession) -> Result<Reply, ApiError> {
        let session = Session::start(request)?;
        let id = session.id();
        let reply = session.started_reply();
        let sender = Actor::spawn(session);
        self.sessions
            .lock()
            .expect("lobby lock")
            .insert(id, sender);
        log::info!("[lobby] session {} registered", id);
        Ok(reply)
    }

    /// Routes one request to a session and awaits its reply in order.
    pub async fn call(&self, session_id: &str, request: Request) -> Result<Reply, ApiError> {
        let id = ID::<Session>::parse(session_id).ok_or(ApiError::SessionGone)?;
        let ending = matches!(request, Request::End);
        let sender = self
            .sessions
            .lock()
            .expect("lobby lock")
            .get(&id)
            .cloned()
            .ok_or(ApiError::SessionGone)?;
        let (tx, rx) = oneshot::channel();
        sender
            .send(Envelope { request, reply: tx })
            .map_err(|_| ApiError::SessionGone)?;
        let result = rx.await.map_err(|_| ApiError::SessionGone)?;
        if ending {
            self.sessions.lock().expect("lobby lock").remove(&id);
            log::info!("[lobby] session {} removed", id);
        }
        result
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("lobby lock").len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_dto::Mode;
    use pb_strategy::Action;

    fn start_request(mode: Mode) -> StartSession {
        StartSession {
            mode,
            bankroll: 10_000.0,
            rules: None,
            betting: None,
            seed: Some(99),
        }
    }

    fn session_id(reply: &Reply) -> String {
        match reply {
            Reply::Started { session_id, .. } => session_id.clone(),
            reply => panic!("expected Started, got {:?}", reply),
        }
    }

    #[tokio::test]
    async fn start_then_end_forgets_the_session() {
        let lobby = Lobby::new();
        let id = session_id(&lobby.start(start_request(Mode::Manual)).unwrap());
        assert_eq!(lobby.len(), 1);
        assert_eq!(
            lobby.call(&id, Request::End).await.unwrap(),
            Reply::Ended
        );
        assert!(lobby.is_empty());
        assert_eq!(
            lobby.call(&id, Request::Status).await,
            Err(ApiError::SessionGone)
        );
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_gone() {
        let lobby = Lobby::new();
        assert_eq!(
            lobby.call("not-a-uuid", Request::Status).await,
            Err(ApiError::SessionGone)
        );
        let ghost = ID::<Session>::default().to_string();
        assert_eq!(
            lobby.call(&ghost, Request::Status).await,
            Err(ApiError::SessionGone)
        );
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let lobby = Lobby::new();
        let shadow = session_id(&lobby.start(start_request(Mode::Manual)).unwrap());
        let auto = session_id(&lobby.start(start_request(Mode::Auto)).unwrap());
        lobby
            .call(
                &shadow,
                Request::Observe {
                    cards: vec!["5h".into(), "6d".into()],
                },
            )
            .await
            .unwrap();
        // the auto session's count is untouched by the shadow session
        match lobby.call(&auto, Request::Status).await.unwrap() {
            Reply::Status { count_snapshot, .. } => {
                assert_eq!(count_snapshot.cards_dealt, 0);
            }
            reply => panic!("expected Status, got {:?}", reply),
        }
    }

    #[tokio::test]
    async fn full_shadow_round_trip() {
        let lobby = Lobby::new();
        let id = session_id(&lobby.start(start_request(Mode::Manual)).unwrap());
        lobby
            .call(
                &id,
                Request::Observe {
                    cards: vec!["2h".into(), "3d".into(), "4c".into()],
                },
            )
            .await
            .unwrap();
        match lobby
            .call(
                &id,
                Request::QueryDecision {
                    player_cards: vec!["Th".into(), "6d".into()],
                    dealer_up: "Ts".into(),
                },
            )
            .await
            .unwrap()
        {
            Reply::Decided {
                recommended_action, ..
            } => assert_eq!(recommended_action, Action::Stand),
            reply => panic!("expected Decided, got {:?}", reply),
        }
    }

    #[tokio::test]
    async fn full_auto_round_trip() {
        let lobby = Lobby::new();
        let id = session_id(&lobby.start(start_request(Mode::Auto)).unwrap());
        match lobby.call(&id, Request::Deal).await.unwrap() {
            Reply::Dealt {
                player_cards,
                recommended_bet,
                ..
            } => {
                assert_eq!(player_cards.len(), 2);
                assert!(recommended_bet >= 15.0);
            }
            reply => panic!("expected Dealt, got {:?}", reply),
        }
        // stand until the round settles
        loop {
            match lobby
                .call(
                    &id,
                    Request::Action {
                        action: "stand".into(),
                    },
                )
                .await
                .unwrap()
            {
                Reply::Acted { round_over, .. } if round_over => break,
                Reply::Acted { .. } => continue,
                reply => panic!("expected Acted, got {:?}", reply),
            }
        }
        match lobby.call(&id, Request::Status).await.unwrap() {
            Reply::Status {
                hands_played,
                state,
                ..
            } => {
                assert_eq!(hands_played, 1);
                assert_eq!(state, "settled");
            }
            reply => panic!("expected Status, got {:?}", reply),
        }
    }
}
