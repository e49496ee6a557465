//! In-memory repositories and request helpers shared by integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use recipe_api::api::{router, AppState};
use recipe_api::config::AuthSettings;
use recipe_api::domain::recipe::{Ingredient, Label, Recipe, RecipeChanges, RecipeDraft, Tag};
use recipe_api::domain::repositories::user_repository::{User, UserChanges};
use recipe_api::domain::repositories::{
    LabelRepository, RecipeRepository, RepositoryError, UserRepository,
};
use recipe_api::domain::user::Email;
use serde_json::Value;
use tower::util::ServiceExt; // for oneshot
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-for-integration-tests";

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<Uuid, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Duplicate("user with this email"));
        }
        let id = user.id;
        users.insert(id, user);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&id).ok_or(RepositoryError::NotFound("user"))?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        Ok(user.clone())
    }

    async fn update_last_login(&self, _user_id: Uuid) -> Result<(), RepositoryError> {
        Ok(())
    }
}

impl InMemoryUserRepository {
    pub fn deactivate(&self, id: Uuid) {
        if let Some(user) = self.users.lock().unwrap().get_mut(&id) {
            user.is_active = false;
        }
    }
}

#[derive(Default)]
pub struct InMemoryRecipeRepository {
    rows: Mutex<(i64, Vec<Recipe>)>,
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn list(&self, owner: Uuid) -> Result<Vec<Recipe>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let mut recipes: Vec<Recipe> = rows.1.iter().filter(|r| r.user_id == owner).cloned().collect();
        recipes.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(recipes)
    }

    async fn find(&self, owner: Uuid, id: i64) -> Result<Option<Recipe>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.1.iter().find(|r| r.id == id && r.user_id == owner).cloned())
    }

    async fn create(&self, owner: Uuid, draft: RecipeDraft) -> Result<Recipe, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        rows.0 += 1;
        let recipe = Recipe {
            id: rows.0,
            user_id: owner,
            title: draft.title,
            time_minutes: draft.time_minutes,
            price: draft.price,
            description: draft.description,
            image: None,
        };
        rows.1.push(recipe.clone());
        Ok(recipe)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: i64,
        changes: RecipeChanges,
    ) -> Result<Recipe, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let recipe = rows
            .1
            .iter_mut()
            .find(|r| r.id == id && r.user_id == owner)
            .ok_or(RepositoryError::NotFound("recipe"))?;
        changes.apply_to(recipe);
        Ok(recipe.clone())
    }

    async fn delete(&self, owner: Uuid, id: i64) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.1.len();
        rows.1.retain(|r| !(r.id == id && r.user_id == owner));
        if rows.1.len() == before {
            return Err(RepositoryError::NotFound("recipe"));
        }
        Ok(())
    }
}

pub struct InMemoryLabelRepository<L> {
    rows: Mutex<(i64, Vec<L>)>,
}

impl<L> Default for InMemoryLabelRepository<L> {
    fn default() -> Self {
        Self {
            rows: Mutex::new((0, Vec::new())),
        }
    }
}

#[async_trait]
impl<L: Label> LabelRepository<L> for InMemoryLabelRepository<L> {
    async fn list(&self, owner: Uuid) -> Result<Vec<L>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let mut labels: Vec<L> = rows.1.iter().filter(|l| l.user_id() == owner).cloned().collect();
        labels.sort_by(|a, b| b.name().cmp(a.name()).then(b.id().cmp(&a.id())));
        Ok(labels)
    }

    async fn find(&self, owner: Uuid, id: i64) -> Result<Option<L>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.1.iter().find(|l| l.id() == id && l.user_id() == owner).cloned())
    }

    async fn create(&self, owner: Uuid, name: String) -> Result<L, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        rows.0 += 1;
        let label = L::from_parts(rows.0, owner, name);
        rows.1.push(label.clone());
        Ok(label)
    }

    async fn update(&self, owner: Uuid, id: i64, name: Option<String>) -> Result<L, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let label = rows
            .1
            .iter_mut()
            .find(|l| l.id() == id && l.user_id() == owner)
            .ok_or(RepositoryError::NotFound(L::KIND))?;
        if let Some(name) = name {
            label.set_name(name);
        }
        Ok(label.clone())
    }

    async fn delete(&self, owner: Uuid, id: i64) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.1.len();
        rows.1.retain(|l| !(l.id() == id && l.user_id() == owner));
        if rows.1.len() == before {
            return Err(RepositoryError::NotFound(L::KIND));
        }
        Ok(())
    }
}

/// Test application with handles on its repositories
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn setup_app() -> TestApp {
    let users = Arc::new(InMemoryUserRepository::default());
    let state = AppState {
        users: users.clone(),
        recipes: Arc::new(InMemoryRecipeRepository::default()),
        tags: Arc::new(InMemoryLabelRepository::<Tag>::default()),
        ingredients: Arc::new(InMemoryLabelRepository::<Ingredient>::default()),
        auth: Arc::new(AuthSettings::new(TEST_SECRET)),
    };

    TestApp {
        router: router(state.clone()),
        state,
        users,
    }
}

impl TestApp {
    /// Sends a request and returns the status with the parsed JSON body
    ///
    /// Empty bodies come back as `Value::Null`.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Registers an account and returns a bearer token for it
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        let (status, _) = self
            .send(
                "POST",
                "/api/user/create/",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                    "name": "Test User"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .send(
                "POST",
                "/api/user/token/",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        body["token"].as_str().unwrap().to_string()
    }

    /// Resolves a token back to its user id
    pub fn user_id(&self, token: &str) -> Uuid {
        recipe_api::auth::jwt::verify_token(token, TEST_SECRET)
            .unwrap()
            .sub
    }
}
