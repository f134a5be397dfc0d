use std::io;
use std::sync::Arc;

use quiz_client::{ClientEvent, ClientHandle, QuizApi};
use quiz_core::{Effect, Msg};
use quiz_logging::{quiz_info, quiz_warn};

pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn QuizApi>) -> io::Result<Self> {
        Ok(Self {
            client: ClientHandle::new(api)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchHistory => self.client.fetch_history(),
                Effect::GenerateQuiz { url } => {
                    quiz_info!("GenerateQuiz url_len={} url={}", url.len(), url);
                    self.client.generate_quiz(url);
                }
                Effect::FetchQuiz { id } => {
                    quiz_info!("FetchQuiz id={}", id);
                    self.client.fetch_quiz(id);
                }
            }
        }
    }

    /// Collects every finished request as a message for `update`.
    pub fn drain(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.client.try_recv())
            .map(event_to_msg)
            .collect()
    }
}

fn event_to_msg(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::HistoryFetched(result) => Msg::HistoryLoaded(result.map_err(|err| {
            quiz_warn!("Failed to fetch history: {}", err);
            err.into_error_value()
        })),
        ClientEvent::QuizGenerated(result) => Msg::QuizGenerated(result.map_err(|err| {
            quiz_warn!("Quiz generation failed: {}", err);
            err.into_error_value()
        })),
        ClientEvent::QuizFetched { id, result } => Msg::HistoryItemLoaded {
            result: result.map_err(|err| {
                quiz_warn!("Failed to load quiz {}: {}", id, err);
                err.into_error_value()
            }),
            id,
        },
    }
}
