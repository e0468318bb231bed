//! Creation form state machine.
//!
//! `Idle -> Submitting -> {Success, Failed}`. Success and Failed behave like
//! Idle with a visible outcome: the form stays editable and the outcome is
//! replaced on the next submission.

use crate::api::RequestError;
use crate::models::{GenerationRequest, GenerationResult, Mood, Style};
use crate::state::text_field::{TextEdit, TextField};
use std::path::PathBuf;

pub const GENERATE_FAILED: &str = "Failed to generate meme";
pub const DOWNLOAD_FAILED: &str = "Failed to download meme";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GeneratorPhase {
    #[default]
    Idle,
    Submitting,
    Success(GenerationResult),
    Failed(String),
}

#[derive(Debug)]
pub enum GeneratorEvent {
    Edit(TextEdit),
    SelectStyle(Style),
    SelectMood(Mood),
    Submit,
    Completed {
        request_id: u64,
        outcome: Result<GenerationResult, RequestError>,
    },
    Download,
    Downloaded(Result<PathBuf, RequestError>),
}

/// Work the view must perform on behalf of the reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneratorCommand {
    Generate {
        request_id: u64,
        request: GenerationRequest,
    },
    Download {
        image_path: String,
    },
}

#[derive(Clone, Debug, Default)]
pub struct GeneratorState {
    pub situation: TextField,
    pub style: Style,
    pub mood: Mood,
    pub phase: GeneratorPhase,
    pub download_notice: Option<String>,
    request_id: u64,
}

impl GeneratorState {
    pub fn is_submitting(&self) -> bool {
        self.phase == GeneratorPhase::Submitting
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match &self.phase {
            GeneratorPhase::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            GeneratorPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn update(&mut self, event: GeneratorEvent) -> Option<GeneratorCommand> {
        match event {
            GeneratorEvent::Edit(edit) => {
                if !self.is_submitting() {
                    self.situation.apply(edit);
                }
                None
            }
            GeneratorEvent::SelectStyle(style) => {
                if !self.is_submitting() {
                    self.style = style;
                }
                None
            }
            GeneratorEvent::SelectMood(mood) => {
                if !self.is_submitting() {
                    self.mood = mood;
                }
                None
            }
            GeneratorEvent::Submit => self.submit(),
            GeneratorEvent::Completed {
                request_id,
                outcome,
            } => {
                if !self.is_submitting() || request_id != self.request_id {
                    return None;
                }
                self.phase = match outcome {
                    Ok(result) => {
                        self.situation.clear();
                        GeneratorPhase::Success(result)
                    }
                    Err(e) => GeneratorPhase::Failed(e.user_message(GENERATE_FAILED)),
                };
                None
            }
            GeneratorEvent::Download => {
                let image_path = self.result()?.image_path.clone();
                self.download_notice = None;
                Some(GeneratorCommand::Download { image_path })
            }
            GeneratorEvent::Downloaded(outcome) => {
                self.download_notice = Some(match outcome {
                    Ok(path) => format!("Saved to {}", path.display()),
                    Err(e) => e.user_message(DOWNLOAD_FAILED),
                });
                None
            }
        }
    }

    fn submit(&mut self) -> Option<GeneratorCommand> {
        if self.is_submitting() {
            return None;
        }
        let request = match GenerationRequest::new(self.situation.text(), self.style, self.mood) {
            Ok(request) => request,
            Err(e) => {
                self.phase = GeneratorPhase::Failed(e.user_message(GENERATE_FAILED));
                return None;
            }
        };

        self.request_id += 1;
        self.phase = GeneratorPhase::Submitting;
        self.download_notice = None;
        Some(GeneratorCommand::Generate {
            request_id: self.request_id,
            request,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EMPTY_SITUATION;

    fn with_text(text: &str) -> GeneratorState {
        let mut state = GeneratorState::default();
        state.update(GeneratorEvent::Edit(TextEdit::Insert(text.to_string())));
        state
    }

    fn submit(state: &mut GeneratorState) -> u64 {
        match state.update(GeneratorEvent::Submit) {
            Some(GeneratorCommand::Generate { request_id, .. }) => request_id,
            other => panic!("expected a generate command, got {:?}", other),
        }
    }

    fn meme() -> GenerationResult {
        GenerationResult {
            image_path: "output\\meme1.png".to_string(),
            text: "Three new bugs".to_string(),
            situation: None,
        }
    }

    #[test]
    fn blank_submission_is_rejected_locally() {
        for text in ["", "   ", "\u{3000}"] {
            let mut state = with_text(text);
            assert_eq!(state.update(GeneratorEvent::Submit), None);
            assert_eq!(state.error(), Some(EMPTY_SITUATION));
            assert!(state.result().is_none());
        }
    }

    #[test]
    fn submit_emits_request_with_selections() {
        let mut state = with_text("When you fix a bug but create three new ones");
        state.update(GeneratorEvent::SelectStyle(Style::Realistic));
        state.update(GeneratorEvent::SelectMood(Mood::Dramatic));

        let command = state.update(GeneratorEvent::Submit).unwrap();
        let GeneratorCommand::Generate { request, .. } = command else {
            panic!("expected a generate command");
        };
        assert_eq!(request.situation(), "When you fix a bug but create three new ones");
        assert_eq!(request.style(), Style::Realistic);
        assert_eq!(request.mood(), Mood::Dramatic);
        assert!(state.is_submitting());
    }

    #[test]
    fn submit_clears_previous_outcome() {
        let mut state = with_text("first");
        let id = submit(&mut state);
        state.update(GeneratorEvent::Completed {
            request_id: id,
            outcome: Err(RequestError::Status { status: 500 }),
        });
        assert!(state.error().is_some());

        state.update(GeneratorEvent::Edit(TextEdit::Insert("!".to_string())));
        submit(&mut state);
        assert!(state.error().is_none());
        assert!(state.result().is_none());
    }

    #[test]
    fn success_clears_input_and_stores_result() {
        let mut state = with_text("standup at 9am");
        let id = submit(&mut state);
        state.update(GeneratorEvent::Completed {
            request_id: id,
            outcome: Ok(meme()),
        });

        assert_eq!(state.situation.text(), "");
        assert_eq!(state.result(), Some(&meme()));
        assert!(state.error().is_none());
    }

    #[test]
    fn failure_keeps_input_and_prefers_server_message() {
        let mut state = with_text("standup at 9am");
        let id = submit(&mut state);
        state.update(GeneratorEvent::Completed {
            request_id: id,
            outcome: Err(RequestError::Server {
                status: 500,
                message: "Image model overloaded".to_string(),
            }),
        });

        assert_eq!(state.situation.text(), "standup at 9am");
        assert_eq!(state.error(), Some("Image model overloaded"));
        assert!(state.result().is_none());
    }

    #[test]
    fn transport_failure_uses_generic_message() {
        let mut state = with_text("deploy on friday");
        let id = submit(&mut state);
        state.update(GeneratorEvent::Completed {
            request_id: id,
            outcome: Err(RequestError::Status { status: 502 }),
        });
        assert_eq!(state.error(), Some(GENERATE_FAILED));
    }

    #[test]
    fn inputs_are_frozen_while_submitting() {
        let mut state = with_text("meeting");
        submit(&mut state);

        state.update(GeneratorEvent::Edit(TextEdit::Backspace));
        state.update(GeneratorEvent::SelectStyle(Style::MemeStyle));
        state.update(GeneratorEvent::SelectMood(Mood::Sarcastic));
        assert_eq!(state.update(GeneratorEvent::Submit), None);

        assert_eq!(state.situation.text(), "meeting");
        assert_eq!(state.style, Style::Cartoon);
        assert_eq!(state.mood, Mood::Funny);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = with_text("meeting");
        let id = submit(&mut state);
        state.update(GeneratorEvent::Completed {
            request_id: id + 1,
            outcome: Ok(meme()),
        });
        assert!(state.is_submitting());
        assert_eq!(state.situation.text(), "meeting");
    }

    #[test]
    fn outcome_stays_visible_while_editing() {
        let mut state = with_text("meeting");
        let id = submit(&mut state);
        state.update(GeneratorEvent::Completed {
            request_id: id,
            outcome: Ok(meme()),
        });
        state.update(GeneratorEvent::Edit(TextEdit::Insert("next".to_string())));
        assert_eq!(state.result(), Some(&meme()));
        assert_eq!(state.situation.text(), "next");
    }

    #[test]
    fn download_requires_a_result() {
        let mut state = GeneratorState::default();
        assert_eq!(state.update(GeneratorEvent::Download), None);

        let mut state = with_text("meeting");
        let id = submit(&mut state);
        state.update(GeneratorEvent::Completed {
            request_id: id,
            outcome: Ok(meme()),
        });
        assert_eq!(
            state.update(GeneratorEvent::Download),
            Some(GeneratorCommand::Download {
                image_path: "output\\meme1.png".to_string()
            })
        );

        state.update(GeneratorEvent::Downloaded(Ok(PathBuf::from("/tmp/meme1.png"))));
        assert_eq!(state.download_notice.as_deref(), Some("Saved to /tmp/meme1.png"));
    }
}
