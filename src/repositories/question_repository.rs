use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Document},
    options::{
        FindOneAndUpdateOptions, FindOneOptions, FindOptions, IndexOptions, ReturnDocument,
    },
    Collection, IndexModel,
};
use tokio::sync::RwLock;

use crate::{
    db::{Database, QUESTIONS_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::{NewQuestion, Question},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// All questions sorted by `(order, id)`.
    async fn list_ordered(&self) -> AppResult<Vec<Question>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>>;
    /// Stores a new question, assigning its id and timestamps.
    async fn create(&self, question: NewQuestion, order: i32) -> AppResult<Question>;
    /// Returns whether a question was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
    async fn count(&self) -> AppResult<u64>;
    async fn max_order(&self) -> AppResult<Option<i32>>;
    async fn set_order(&self, id: i64, order: i32) -> AppResult<Question>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
    counters: Collection<Document>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_collection(QUESTIONS_COLLECTION),
            counters: db.counters(),
        }
    }

    async fn next_id(&self) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": QUESTIONS_COLLECTION },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .with_options(options)
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError("question id counter was not returned".to_string())
            })?;

        Ok(counter.get_i64("seq")?)
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn list_ordered(&self) -> AppResult<Vec<Question>> {
        let options = FindOptions::builder()
            .sort(doc! { "order": 1, "id": 1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn create(&self, question: NewQuestion, order: i32) -> AppResult<Question> {
        let id = self.next_id().await?;
        let question = question.into_question(id, order);

        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }

    async fn max_order(&self) -> AppResult<Option<i32>> {
        let options = FindOneOptions::builder()
            .sort(doc! { "order": -1 })
            .build();

        let top = self.collection.find_one(doc! {}).with_options(options).await?;
        Ok(top.map(|q| q.order))
    }

    async fn set_order(&self, id: i64, order: i32) -> AppResult<Question> {
        let updated_at = to_bson(&Utc::now())?;
        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "order": order, "updated_at": updated_at } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Question with id '{}' not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let order_index = IndexModel::builder()
            .keys(doc! { "order": 1, "id": 1 })
            .options(IndexOptions::builder().name("order_id".to_string()).build())
            .build();

        let type_index = IndexModel::builder()
            .keys(doc! { "question_type": 1 })
            .options(
                IndexOptions::builder()
                    .name("question_type".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(order_index).await?;
        self.collection.create_index(type_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[derive(Default)]
struct StoredQuestions {
    last_id: i64,
    by_id: BTreeMap<i64, Question>,
}

/// Process-local store, used with `STORAGE_BACKEND=memory` and in tests.
#[derive(Default)]
pub struct InMemoryQuestionRepository {
    inner: RwLock<StoredQuestions>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn list_ordered(&self) -> AppResult<Vec<Question>> {
        let inner = self.inner.read().await;
        let mut questions: Vec<_> = inner.by_id.values().cloned().collect();
        questions.sort_by_key(|q| (q.order, q.id));
        Ok(questions)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let inner = self.inner.read().await;
        Ok(inner.by_id.get(&id).cloned())
    }

    async fn create(&self, question: NewQuestion, order: i32) -> AppResult<Question> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let question = question.into_question(inner.last_id, order);
        inner.by_id.insert(question.id, question.clone());
        Ok(question)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.by_id.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.by_id.len() as u64)
    }

    async fn max_order(&self) -> AppResult<Option<i32>> {
        let inner = self.inner.read().await;
        Ok(inner.by_id.values().map(|q| q.order).max())
    }

    async fn set_order(&self, id: i64, order: i32) -> AppResult<Question> {
        let mut inner = self.inner.write().await;
        let question = inner
            .by_id
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))?;

        question.order = order;
        question.updated_at = Utc::now();
        Ok(question.clone())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
