use abi::{LoginRequest, RegisterRequest, Session, User};

use crate::{ApiClient, Error};

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post("/auth/login", &req).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<Session, Error> {
        self.client.post("/auth/register", req).await
    }

    /// the user behind the client's token
    pub async fn current_user(&self) -> Result<User, Error> {
        self.client.get("/auth/me", &[]).await
    }
}
