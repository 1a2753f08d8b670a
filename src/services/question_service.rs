use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{NewQuestion, Question},
    repositories::QuestionRepository,
};

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_ordered(&self) -> AppResult<Vec<Question>> {
        self.repository.list_ordered().await
    }

    pub async fn get_question(&self, id: i64) -> AppResult<Question> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.repository.count().await
    }

    /// Validates and stores a question at the end of the current order.
    pub async fn create_question(&self, question: NewQuestion) -> AppResult<Question> {
        question.validate()?;

        let order = self.repository.max_order().await?.unwrap_or(0) + 1;
        let created = self.repository.create(question, order).await?;

        log::info!(
            "Created {} question {} at order {}",
            created.question_type.code(),
            created.id,
            created.order
        );
        Ok(created)
    }

    /// Deleting a question that does not exist is a no-op.
    pub async fn delete_question(&self, id: i64) -> AppResult<()> {
        if self.repository.delete(id).await? {
            log::info!("Deleted question {}", id);
        } else {
            log::warn!("Delete requested for missing question {}", id);
        }
        Ok(())
    }

    /// Moves a question to `order`; an unchanged order skips the write.
    pub async fn reorder_question(&self, id: i64, order: i32) -> AppResult<Question> {
        let question = self.get_question(id).await?;
        if question.order == order {
            return Ok(question);
        }

        let moved = self.repository.set_order(id, order).await?;
        log::info!("Moved question {} from order {} to {}", id, question.order, order);
        Ok(moved)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.repository.count().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repositories::question_repository::MockQuestionRepository,
        test_utils::fixtures::{mcq_input, tf_input},
    };

    #[tokio::test]
    async fn create_on_empty_store_uses_order_one() {
        let mut repo = MockQuestionRepository::new();
        repo.expect_max_order().times(1).returning(|| Ok(None));
        repo.expect_create()
            .withf(|_, order| *order == 1)
            .times(1)
            .returning(|q, order| Ok(q.into_question(1, order)));

        let service = QuestionService::new(Arc::new(repo));
        let created = service.create_question(mcq_input("A")).await.unwrap();

        assert_eq!(created.order, 1);
    }

    #[tokio::test]
    async fn create_appends_after_highest_order() {
        let mut repo = MockQuestionRepository::new();
        repo.expect_max_order().returning(|| Ok(Some(7)));
        repo.expect_create()
            .withf(|_, order| *order == 8)
            .returning(|q, order| Ok(q.into_question(3, order)));

        let service = QuestionService::new(Arc::new(repo));
        let created = service.create_question(tf_input("False")).await.unwrap();

        assert_eq!(created.order, 8);
    }

    #[tokio::test]
    async fn invalid_question_never_reaches_the_store() {
        let mut repo = MockQuestionRepository::new();
        repo.expect_max_order().never();
        repo.expect_create().never();

        let service = QuestionService::new(Arc::new(repo));
        let mut input = mcq_input("A");
        input.option_c = String::new();

        let result = service.create_question(input).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn delete_of_missing_question_is_ok() {
        let mut repo = MockQuestionRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = QuestionService::new(Arc::new(repo));
        assert!(service.delete_question(404).await.is_ok());
    }

    #[tokio::test]
    async fn reorder_of_missing_question_is_not_found() {
        let mut repo = MockQuestionRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_set_order().never();

        let service = QuestionService::new(Arc::new(repo));
        let result = service.reorder_question(5, 2).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn reorder_to_same_position_skips_write() {
        let mut repo = MockQuestionRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(mcq_input("A").into_question(id, 3))));
        repo.expect_set_order().never();

        let service = QuestionService::new(Arc::new(repo));
        let question = service.reorder_question(7, 3).await.unwrap();
        assert_eq!(question.order, 3);
    }

    #[tokio::test]
    async fn reorder_moves_existing_question() {
        let mut repo = MockQuestionRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(mcq_input("A").into_question(id, 1))));
        repo.expect_set_order()
            .withf(|id, order| *id == 7 && *order == 4)
            .times(1)
            .returning(|id, order| Ok(mcq_input("A").into_question(id, order)));

        let service = QuestionService::new(Arc::new(repo));
        let question = service.reorder_question(7, 4).await.unwrap();
        assert_eq!(question.order, 4);
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut repo = MockQuestionRepository::new();
        repo.expect_list_ordered()
            .returning(|| Err(AppError::DatabaseError("down".to_string())));

        let service = QuestionService::new(Arc::new(repo));
        assert!(matches!(
            service.list_ordered().await,
            Err(AppError::DatabaseError(_))
        ));
    }
}
