use uuid::Uuid;

use notes_service::entity::{note, user};
use notes_service::repositories::{NoteRepository, UserRepository};
use notes_service::schemas::{CreateNote, CreateUser};
use notes_service::services::AuthService;
use notes_service::state::AppState;

pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let email = format!("test-{}@example.com", Uuid::new_v4());
        let user = self.create_user_with_email(&email, TEST_PASSWORD).await;

        let token = AuthService::generate_token(user.id, &email, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email,
            token,
        }
    }

    /// Create a test user with specific email
    pub async fn create_user_with_email(&self, email: &str, password: &str) -> user::Model {
        let input = CreateUser {
            name: Some("Test".to_string()),
            surname: Some("User".to_string()),
            email: email.to_string(),
            password_hash: AuthService::hash_password(password).unwrap(),
        };

        self.state
            .sessions
            .with_session(move |txn| {
                Box::pin(async move { UserRepository::new(txn).create(input).await })
            })
            .await
            .unwrap()
    }

    /// Create a note owned by `user_id`, committed in its own session
    pub async fn create_note(&self, user_id: Uuid, title: &str) -> note::Model {
        let input = CreateNote {
            title: title.to_string(),
            description: format!("Description of {}", title),
            user_id: Some(user_id),
        };

        self.state
            .sessions
            .with_session(move |txn| {
                Box::pin(async move { NoteRepository::new(txn).create(input).await })
            })
            .await
            .unwrap()
    }
}
