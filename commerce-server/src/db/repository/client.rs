//! Client Repository

use chrono::Utc;
use uuid::Uuid;

use crate::db::{Database, RepoError, RepoResult, Repository};
use shared::models::client::ROLE_CLIENT;
use shared::models::{Client, ClientCreate, ClientUpdate};

#[derive(Clone)]
pub struct ClientRepository {
    db: Database,
}

impl ClientRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List clients ordered by creation time, with the unpaged total
    pub async fn find_all(&self, limit: usize, offset: usize) -> RepoResult<(Vec<Client>, usize)> {
        let mut clients: Vec<Client> = self.db.clients.iter().map(|e| e.value().clone()).collect();
        clients.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let total = clients.len();
        let page = clients.into_iter().skip(offset).take(limit).collect();
        Ok((page, total))
    }

    /// Look up a client by email (login path)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Client>> {
        Ok(self
            .db
            .clients
            .iter()
            .find(|e| e.value().email == email)
            .map(|e| e.value().clone()))
    }
}

impl Repository<Client, ClientCreate, ClientUpdate> for ClientRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Client>> {
        Ok(self.db.clients.get(id).map(|e| e.value().clone()))
    }

    async fn create(&self, data: ClientCreate) -> RepoResult<Client> {
        if self.db.clients.iter().any(|e| e.value().email == data.email) {
            return Err(RepoError::Duplicate(format!(
                "Client with email {}",
                data.email
            )));
        }

        let now = Utc::now();
        let client = Client {
            id: Uuid::new_v4().to_string(),
            email: data.email,
            password: data.password,
            first_name: data.first_name,
            last_name: data.last_name,
            phone: data.phone,
            role: data.role.unwrap_or_else(|| ROLE_CLIENT.to_string()),
            address: data.address,
            created_at: now,
            updated_at: now,
        };

        self.db.clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    async fn update(&self, id: &str, data: ClientUpdate) -> RepoResult<Client> {
        let mut entry = self
            .db
            .clients
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Client {}", id)))?;

        if let Some(v) = data.first_name {
            entry.first_name = v;
        }
        if let Some(v) = data.last_name {
            entry.last_name = v;
        }
        if let Some(v) = data.phone {
            entry.phone = Some(v);
        }
        if let Some(v) = data.address {
            entry.address = Some(v);
        }
        entry.updated_at = Utc::now();

        Ok(entry.value().clone())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        self.db
            .clients
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("Client {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload(email: &str) -> ClientCreate {
        ClientCreate {
            email: email.to_string(),
            password: "hashed".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: None,
            role: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = ClientRepository::new(crate::db::Store::shared());
        repo.create(create_payload("ada@example.com")).await.unwrap();

        let err = repo
            .create(create_payload("ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_does_not_touch_email() {
        let repo = ClientRepository::new(crate::db::Store::shared());
        let client = repo.create(create_payload("ada@example.com")).await.unwrap();

        let updated = repo
            .update(
                &client.id,
                ClientUpdate {
                    first_name: Some("Grace".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Grace");
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(updated.role, ROLE_CLIENT);
    }
}
