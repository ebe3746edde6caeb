//! Interaction controller: user actions on the interview questions.
//!
//! The controller owns no question state itself; it mutates the injected
//! [`QuestionStore`] and calls the injected [`Gateway`]. Store borrows never
//! span an `.await`, so every event is applied atomically and a late response
//! can interleave with newer actions on the same thread.

use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::parse::parse_questions;
use super::question::{Feedback, QuestionId, Status, MIN_FEEDBACK_CHARS};
use super::store::QuestionStore;
use crate::error::{report, CoachError, ValidationError};
use crate::gateway::{Gateway, QuestionsRequest};

/// Local confirmation returned by a successful save. Nothing is sent anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveConfirmation {
    pub id: QuestionId,
    pub chars: usize,
}

pub struct InterviewController {
    store: Rc<RefCell<QuestionStore>>,
    gateway: Arc<dyn Gateway>,
    /// Outstanding feedback requests, keyed by store generation and id.
    in_flight: RefCell<HashSet<(u64, QuestionId)>>,
}

impl InterviewController {
    pub fn new(store: Rc<RefCell<QuestionStore>>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            store,
            gateway,
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    /// Read access for rendering. Drop the guard before awaiting another action.
    pub fn store(&self) -> Ref<'_, QuestionStore> {
        self.store.borrow()
    }

    /// Asks the gateway for a fresh question list and installs it, replacing
    /// the previous list and every answer in it. Returns the number of questions.
    pub async fn generate_questions(
        &self,
        role: &str,
        experience: &str,
        company: Option<&str>,
    ) -> Result<usize, CoachError> {
        let role = role.trim();
        let experience = experience.trim();
        if role.is_empty() {
            return Err(ValidationError::MissingField("role").into());
        }
        if experience.is_empty() {
            return Err(ValidationError::MissingField("experience").into());
        }

        let request = QuestionsRequest {
            position: role.to_string(),
            experience: experience.to_string(),
            company: company
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        };

        let raw = self
            .gateway
            .generate_interview_questions(&request)
            .await
            .map_err(|e| report(e, "generate questions"))?;

        let questions = parse_questions(&raw);
        let count = questions.len();
        self.store.borrow_mut().replace_all(questions);

        info!(count, role, experience, "Installed generated interview questions");
        Ok(count)
    }

    /// True when regenerating would throw away typed answers.
    pub fn has_unsaved_answers(&self) -> bool {
        self.store
            .borrow()
            .questions()
            .iter()
            .any(|q| !q.answer_text().trim().is_empty())
    }

    pub fn select(&self, id: QuestionId) -> bool {
        self.store.borrow_mut().select(id)
    }

    /// Replaces the answer text and returns the recomputed status.
    pub fn edit_answer(&self, id: QuestionId, text: &str) -> Result<Status, CoachError> {
        let mut store = self.store.borrow_mut();
        if !store.update_answer(id, text) {
            return Err(ValidationError::UnknownQuestion(id).into());
        }
        Ok(store.get(id).map(|q| q.status()).unwrap_or_default())
    }

    /// Edits the currently selected question.
    pub fn edit_selected_answer(&self, text: &str) -> Result<Status, CoachError> {
        let id = self
            .store
            .borrow()
            .selected_id()
            .ok_or(ValidationError::NoSelection)?;
        self.edit_answer(id, text)
    }

    /// Validates the answer locally. Status is left as it is.
    pub fn save_answer(&self, id: QuestionId) -> Result<SaveConfirmation, CoachError> {
        let store = self.store.borrow();
        let question = store.get(id).ok_or(ValidationError::UnknownQuestion(id))?;
        let chars = question.answer_len();
        if chars == 0 {
            return Err(ValidationError::AnswerMissing.into());
        }
        if chars < MIN_FEEDBACK_CHARS {
            return Err(ValidationError::AnswerTooShort {
                len: chars,
                min: MIN_FEEDBACK_CHARS,
            }
            .into());
        }
        debug!(%id, chars, "Answer saved locally");
        Ok(SaveConfirmation { id, chars })
    }

    /// Whether the feedback action is enabled for `id`: the answer is long
    /// enough and no request for it is outstanding.
    pub fn can_request_feedback(&self, id: QuestionId) -> bool {
        let store = self.store.borrow();
        let ready = store.get(id).is_some_and(|q| q.meets_feedback_minimum());
        ready && !self.in_flight.borrow().contains(&(store.generation(), id))
    }

    /// Sends the answer for feedback.
    ///
    /// Marks the question `Pending` while the call is outstanding. On success
    /// the question becomes `Completed` with the feedback attached; on failure
    /// it drops back to `Unanswered`. If the list was replaced or the answer
    /// edited in the meantime, the response is discarded, the question keeps
    /// the state of the newer edit and `CoachError::Superseded` is returned.
    pub async fn request_feedback(&self, id: QuestionId) -> Result<Feedback, CoachError> {
        let (generation, revision, question, answer) = {
            let store = self.store.borrow();
            let q = store.get(id).ok_or(ValidationError::UnknownQuestion(id))?;
            if !q.meets_feedback_minimum() {
                return Err(ValidationError::AnswerTooShort {
                    len: q.answer_len(),
                    min: MIN_FEEDBACK_CHARS,
                }
                .into());
            }
            (
                store.generation(),
                q.revision(),
                q.text().to_string(),
                q.answer_text().to_string(),
            )
        };

        if !self.in_flight.borrow_mut().insert((generation, id)) {
            return Err(ValidationError::FeedbackInFlight(id).into());
        }
        self.store.borrow_mut().set_status(id, Status::Pending);

        let outcome = self.gateway.get_interview_feedback(&question, &answer).await;

        self.in_flight.borrow_mut().remove(&(generation, id));

        let mut store = self.store.borrow_mut();
        if store.generation() != generation {
            debug!(%id, generation, "Dropping feedback for a replaced question list");
            return Err(CoachError::Superseded);
        }
        if store.get(id).map(|q| q.revision()) != Some(revision) {
            debug!(%id, "Dropping feedback for an answer edited in the meantime");
            return Err(CoachError::Superseded);
        }

        match outcome {
            Ok(feedback) => {
                store.set_feedback(id, feedback.clone());
                info!(%id, "Interview feedback received");
                Ok(feedback)
            }
            Err(e) => {
                store.mark_feedback_failed(id);
                Err(report(e, "request feedback"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::gateway::{AnalyzeRequest, GatewayError, GenerateRequest, FEEDBACK_PATH};
    use crate::interview::StructuredFeedback;

    /// Scripted gateway. Feedback can be held until `release` is notified.
    #[derive(Default)]
    struct FakeGateway {
        questions: Mutex<Vec<Result<String, GatewayError>>>,
        feedback: Mutex<Vec<Result<Feedback, GatewayError>>>,
        feedback_calls: Mutex<Vec<(String, String)>>,
        question_calls: Mutex<Vec<QuestionsRequest>>,
        hold_feedback: bool,
        release: Notify,
    }

    impl FakeGateway {
        fn new() -> Self {
            Self::default()
        }

        fn held() -> Self {
            Self {
                hold_feedback: true,
                ..Self::default()
            }
        }

        fn push_questions(&self, reply: Result<&str, GatewayError>) {
            self.questions
                .lock()
                .unwrap()
                .push(reply.map(str::to_string));
        }

        fn push_feedback(&self, reply: Result<Feedback, GatewayError>) {
            self.feedback.lock().unwrap().push(reply);
        }

        fn feedback_call_count(&self) -> usize {
            self.feedback_calls.lock().unwrap().len()
        }
    }

    fn provider_down() -> GatewayError {
        GatewayError::Status {
            path: FEEDBACK_PATH.to_string(),
            status: 500,
            message: "Failed to get response from the language model".to_string(),
        }
    }

    #[async_trait]
    impl Gateway for FakeGateway {
        async fn generate_interview_questions(
            &self,
            request: &QuestionsRequest,
        ) -> Result<String, GatewayError> {
            self.question_calls.lock().unwrap().push(request.clone());
            self.questions.lock().unwrap().remove(0)
        }

        async fn get_interview_feedback(
            &self,
            question: &str,
            answer: &str,
        ) -> Result<Feedback, GatewayError> {
            self.feedback_calls
                .lock()
                .unwrap()
                .push((question.to_string(), answer.to_string()));
            if self.hold_feedback {
                self.release.notified().await;
            }
            self.feedback.lock().unwrap().remove(0)
        }

        async fn analyze_resume(&self, _request: &AnalyzeRequest) -> Result<String, GatewayError> {
            unreachable!("not used by the interview controller")
        }

        async fn generate_resume(&self, _request: &GenerateRequest) -> Result<String, GatewayError> {
            unreachable!("not used by the interview controller")
        }
    }

    fn controller_with(gateway: Arc<FakeGateway>) -> InterviewController {
        InterviewController::new(Rc::new(RefCell::new(QuestionStore::new())), gateway)
    }

    fn id(n: u32) -> QuestionId {
        QuestionId::new(n)
    }

    fn status_of(controller: &InterviewController, n: u32) -> Status {
        controller.store().get(id(n)).unwrap().status()
    }

    /// Scenario A: two questions, ids 1 and 2, in order, unanswered.
    async fn scenario_a(gateway: &Arc<FakeGateway>) -> InterviewController {
        gateway.push_questions(Ok("질문: 질문1\n질문: 질문2"));
        let controller = controller_with(gateway.clone());
        let count = controller
            .generate_questions("프론트엔드", "신입", None)
            .await
            .unwrap();
        assert_eq!(count, 2);
        controller
    }

    /// Scenario B: select 1 and type 60 characters.
    async fn scenario_b(gateway: &Arc<FakeGateway>) -> InterviewController {
        let controller = scenario_a(gateway).await;
        assert!(controller.select(id(1)));
        let status = controller.edit_selected_answer(&"a".repeat(60)).unwrap();
        assert_eq!(status, Status::Pending);
        controller
    }

    #[tokio::test]
    async fn test_scenario_a_generate_installs_questions_in_order() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_a(&gateway).await;

        let store = controller.store();
        let ids: Vec<String> = store.questions().iter().map(|q| q.id().to_string()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(store.questions()[0].text(), "질문1");
        assert_eq!(store.questions()[1].text(), "질문2");
        assert!(store
            .questions()
            .iter()
            .all(|q| q.status() == Status::Unanswered));
        assert_eq!(store.selected_id(), None);

        let calls = gateway.question_calls.lock().unwrap();
        assert_eq!(calls[0].position, "프론트엔드");
        assert_eq!(calls[0].experience, "신입");
        assert_eq!(calls[0].company, None);
    }

    #[tokio::test]
    async fn test_generate_passes_company_and_trims_inputs() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.push_questions(Ok("질문: 질문1"));
        let controller = controller_with(gateway.clone());

        controller
            .generate_questions(" 백엔드 ", "3년차", Some(" 네이버 "))
            .await
            .unwrap();

        let calls = gateway.question_calls.lock().unwrap();
        assert_eq!(calls[0].position, "백엔드");
        assert_eq!(calls[0].company.as_deref(), Some("네이버"));
    }

    #[tokio::test]
    async fn test_generate_requires_role_and_experience() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = controller_with(gateway.clone());

        let err = controller.generate_questions("  ", "신입", None).await.unwrap_err();
        assert!(matches!(
            err,
            CoachError::Validation(ValidationError::MissingField("role"))
        ));
        let err = controller.generate_questions("백엔드", "", None).await.unwrap_err();
        assert!(matches!(
            err,
            CoachError::Validation(ValidationError::MissingField("experience"))
        ));
        assert!(gateway.question_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_failure_keeps_existing_list() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_a(&gateway).await;
        gateway.push_questions(Err(provider_down()));

        let err = controller
            .generate_questions("프론트엔드", "신입", None)
            .await
            .unwrap_err();

        assert!(matches!(err, CoachError::Transport(_)));
        assert_eq!(controller.store().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_with_no_usable_lines_empties_the_list() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_a(&gateway).await;
        controller.select(id(1));
        gateway.push_questions(Ok("\n  \n"));

        let count = controller
            .generate_questions("프론트엔드", "신입", None)
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert!(controller.store().is_empty());
        assert_eq!(controller.store().selected_id(), None);
    }

    #[tokio::test]
    async fn test_regeneration_clears_selection_and_discards_answers() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_b(&gateway).await;
        assert!(controller.has_unsaved_answers());

        gateway.push_questions(Ok("질문: 새 질문"));
        controller
            .generate_questions("프론트엔드", "신입", None)
            .await
            .unwrap();

        let store = controller.store();
        assert_eq!(store.selected_id(), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.questions()[0].text(), "새 질문");
        assert_eq!(store.questions()[0].answer_text(), "");
        drop(store);
        assert!(!controller.has_unsaved_answers());
    }

    #[tokio::test]
    async fn test_scenario_b_typing_enables_feedback() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_b(&gateway).await;

        assert_eq!(status_of(&controller, 1), Status::Pending);
        assert!(controller.can_request_feedback(id(1)));
        assert!(!controller.can_request_feedback(id(2)));
    }

    #[tokio::test]
    async fn test_scenario_c_feedback_success_completes_question() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_b(&gateway).await;
        gateway.push_feedback(Ok(Feedback::Text("좋은 답변입니다.".into())));

        let feedback = controller.request_feedback(id(1)).await.unwrap();

        assert_eq!(feedback, Feedback::Text("좋은 답변입니다.".into()));
        let store = controller.store();
        let q = store.get(id(1)).unwrap();
        assert_eq!(q.status(), Status::Completed);
        assert_eq!(q.feedback(), Some(&Feedback::Text("좋은 답변입니다.".into())));

        let calls = gateway.feedback_calls.lock().unwrap();
        assert_eq!(calls[0], ("질문1".to_string(), "a".repeat(60)));
    }

    #[tokio::test]
    async fn test_scenario_d_edit_after_completion_keeps_stale_feedback() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_b(&gateway).await;
        gateway.push_feedback(Ok(Feedback::Text("좋은 답변입니다.".into())));
        controller.request_feedback(id(1)).await.unwrap();

        let status = controller.edit_answer(id(1), &"a".repeat(61)).unwrap();

        assert_eq!(status, Status::Pending);
        let store = controller.store();
        let q = store.get(id(1)).unwrap();
        assert!(q.feedback().is_none());
        assert_eq!(
            q.stale_feedback(),
            Some(&Feedback::Text("좋은 답변입니다.".into()))
        );
    }

    #[tokio::test]
    async fn test_scenario_e_49_characters_never_reach_the_gateway() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_a(&gateway).await;
        controller.edit_answer(id(1), &format!("  {}  ", "a".repeat(49))).unwrap();
        let before = status_of(&controller, 1);

        assert!(!controller.can_request_feedback(id(1)));
        let err = controller.request_feedback(id(1)).await.unwrap_err();

        assert!(matches!(
            err,
            CoachError::Validation(ValidationError::AnswerTooShort { len: 49, min: 50 })
        ));
        assert_eq!(status_of(&controller, 1), before);
        assert_eq!(gateway.feedback_call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_answers_never_enable_feedback() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_a(&gateway).await;
        for len in 0..MIN_FEEDBACK_CHARS {
            controller.edit_answer(id(1), &"가".repeat(len)).unwrap();
            assert!(!controller.can_request_feedback(id(1)), "enabled at {len}");
        }
        controller.edit_answer(id(1), &"가".repeat(MIN_FEEDBACK_CHARS)).unwrap();
        assert!(controller.can_request_feedback(id(1)));
    }

    #[tokio::test]
    async fn test_scenario_f_failure_reverts_to_unanswered() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_b(&gateway).await;
        gateway.push_feedback(Err(provider_down()));

        let err = controller.request_feedback(id(1)).await.unwrap_err();

        assert!(matches!(err, CoachError::Transport(_)));
        assert_eq!(err.user_message(), "요청 중 문제가 발생했습니다. 다시 시도해주세요.");
        let store = controller.store();
        let q = store.get(id(1)).unwrap();
        assert_eq!(q.status(), Status::Unanswered);
        assert!(q.feedback().is_none());
        assert!(q.stale_feedback().is_none());
        // The answer itself survives so it can be re-submitted.
        assert_eq!(q.answer_text(), "a".repeat(60));
    }

    #[tokio::test]
    async fn test_malformed_feedback_is_its_own_error_kind() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_b(&gateway).await;
        gateway.push_feedback(Err(GatewayError::Malformed {
            path: FEEDBACK_PATH.to_string(),
            reason: "missing field `feedback`".to_string(),
        }));

        let err = controller.request_feedback(id(1)).await.unwrap_err();

        assert!(matches!(err, CoachError::MalformedResponse(_)));
        assert_eq!(status_of(&controller, 1), Status::Unanswered);
    }

    #[tokio::test]
    async fn test_structured_feedback_is_stored_as_is() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_b(&gateway).await;
        let structured = Feedback::Structured(StructuredFeedback {
            score: 75,
            improvements: vec!["구체적인 사례를 더 추가해주세요".into()],
            suggestions: vec!["STAR 기법을 활용해보세요".into()],
        });
        gateway.push_feedback(Ok(structured.clone()));

        controller.request_feedback(id(1)).await.unwrap();

        assert_eq!(
            controller.store().get(id(1)).unwrap().feedback(),
            Some(&structured)
        );
    }

    #[tokio::test]
    async fn test_request_in_flight_is_pending_and_blocks_second_request() {
        let gateway = Arc::new(FakeGateway::held());
        let controller = scenario_b(&gateway).await;
        gateway.push_feedback(Ok(Feedback::Text("좋은 답변입니다.".into())));

        let first = controller.request_feedback(id(1));
        let observe = async {
            tokio::task::yield_now().await;
            assert_eq!(status_of(&controller, 1), Status::Pending);
            assert!(!controller.can_request_feedback(id(1)));
            let second = controller.request_feedback(id(1)).await;
            assert!(matches!(
                second,
                Err(CoachError::Validation(ValidationError::FeedbackInFlight(_)))
            ));
            gateway.release.notify_one();
        };
        let (first, ()) = tokio::join!(first, observe);

        assert!(first.is_ok());
        assert_eq!(status_of(&controller, 1), Status::Completed);
        assert!(controller.can_request_feedback(id(1)));
        assert_eq!(gateway.feedback_call_count(), 1);
    }

    #[tokio::test]
    async fn test_late_feedback_after_regeneration_is_discarded() {
        let gateway = Arc::new(FakeGateway::held());
        let controller = scenario_b(&gateway).await;
        gateway.push_feedback(Ok(Feedback::Text("늦은 피드백".into())));
        gateway.push_questions(Ok("질문: 새 질문1\n질문: 새 질문2"));

        let pending = controller.request_feedback(id(1));
        let regenerate = async {
            tokio::task::yield_now().await;
            controller
                .generate_questions("프론트엔드", "신입", None)
                .await
                .unwrap();
            gateway.release.notify_one();
        };
        let (late, ()) = tokio::join!(pending, regenerate);

        assert!(matches!(late, Err(CoachError::Superseded)));
        let store = controller.store();
        // Id 1 exists again in the new list but must not receive the old response.
        let q = store.get(id(1)).unwrap();
        assert_eq!(q.text(), "새 질문1");
        assert_eq!(q.status(), Status::Unanswered);
        assert!(q.feedback().is_none());
        drop(store);
        assert!(!controller.can_request_feedback(id(1)));
    }

    #[tokio::test]
    async fn test_clearing_answer_while_feedback_is_in_flight_wins() {
        let gateway = Arc::new(FakeGateway::held());
        let controller = scenario_b(&gateway).await;
        gateway.push_feedback(Ok(Feedback::Text("이전 답변에 대한 피드백".into())));

        let pending = controller.request_feedback(id(1));
        let clear = async {
            tokio::task::yield_now().await;
            let status = controller.edit_answer(id(1), "").unwrap();
            assert_eq!(status, Status::Unanswered);
            gateway.release.notify_one();
        };
        let (late, ()) = tokio::join!(pending, clear);

        assert!(matches!(late, Err(CoachError::Superseded)));
        let store = controller.store();
        let q = store.get(id(1)).unwrap();
        assert_eq!(q.status(), Status::Unanswered);
        assert_eq!(q.answer_text(), "");
        assert!(q.feedback().is_none());
        assert!(q.stale_feedback().is_none());
    }

    #[tokio::test]
    async fn test_failure_after_answer_was_edited_keeps_new_answer_pending() {
        let gateway = Arc::new(FakeGateway::held());
        let controller = scenario_b(&gateway).await;
        gateway.push_feedback(Err(provider_down()));

        let pending = controller.request_feedback(id(1));
        let rewrite = async {
            tokio::task::yield_now().await;
            controller.edit_answer(id(1), &"b".repeat(70)).unwrap();
            gateway.release.notify_one();
        };
        let (late, ()) = tokio::join!(pending, rewrite);

        assert!(matches!(late, Err(CoachError::Superseded)));
        assert_eq!(status_of(&controller, 1), Status::Pending);
        assert!(controller.can_request_feedback(id(1)));
    }

    #[tokio::test]
    async fn test_save_answer_validation() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_a(&gateway).await;

        let err = controller.save_answer(id(1)).unwrap_err();
        assert!(matches!(
            err,
            CoachError::Validation(ValidationError::AnswerMissing)
        ));

        controller.edit_answer(id(1), "짧은 답변").unwrap();
        let err = controller.save_answer(id(1)).unwrap_err();
        assert_eq!(err.user_message(), "답변은 최소 50자 이상 입력해주세요.");

        controller.edit_answer(id(1), &"a".repeat(50)).unwrap();
        let saved = controller.save_answer(id(1)).unwrap();
        assert_eq!(saved, SaveConfirmation { id: id(1), chars: 50 });
        assert_eq!(status_of(&controller, 1), Status::Pending);
        assert_eq!(gateway.feedback_call_count(), 0);
    }

    #[tokio::test]
    async fn test_actions_on_unknown_or_unselected_questions() {
        let gateway = Arc::new(FakeGateway::new());
        let controller = scenario_a(&gateway).await;

        assert!(!controller.select(id(7)));
        assert!(matches!(
            controller.edit_selected_answer("x"),
            Err(CoachError::Validation(ValidationError::NoSelection))
        ));
        assert!(matches!(
            controller.edit_answer(id(7), "x"),
            Err(CoachError::Validation(ValidationError::UnknownQuestion(_)))
        ));
        assert!(matches!(
            controller.request_feedback(id(7)).await,
            Err(CoachError::Validation(ValidationError::UnknownQuestion(_)))
        ));
    }
}
