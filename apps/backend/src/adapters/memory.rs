//! In-memory repositories. Used when no database is configured and by the
//! router tests.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;

use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::products::{Product, ProductDraft, ProductRepository};
use crate::repos::users::{NewUser, User, UserRepository};

fn email_taken() -> DomainError {
    DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered")
}

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.lock();
        if users.values().any(|u| u.email == user.email) {
            return Err(email_taken());
        }
        if users.contains_key(&user.id) {
            return Err(DomainError::conflict(
                ConflictKind::Other("UniqueId".into()),
                "User id already exists",
            ));
        }

        let now = OffsetDateTime::now_utc();
        let created = User {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            created_at: now,
            updated_at: now,
        };
        users.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: &str,
        email: &str,
        name: &str,
    ) -> Result<Option<User>, DomainError> {
        let mut users = self.users.lock();
        if users.values().any(|u| u.email == email && u.id != id) {
            return Err(email_taken());
        }
        Ok(users.get_mut(id).map(|user| {
            user.email = email.to_string();
            user.name = name.to_string();
            user.updated_at = OffsetDateTime::now_utc();
            user.clone()
        }))
    }

    async fn update_password_hash(
        &self,
        id: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.lock();
        match users.get_mut(id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = OffsetDateTime::now_utc();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.users.lock().remove(id).is_some())
    }
}

#[derive(Debug)]
struct ProductTable {
    next_id: i64,
    rows: BTreeMap<i64, Product>,
}

#[derive(Debug)]
pub struct MemoryProductRepository {
    table: Mutex<ProductTable>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(ProductTable {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn create(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        let mut table = self.table.lock();
        let id = table.next_id;
        table.next_id += 1;

        let now = OffsetDateTime::now_utc();
        let product = Product {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, DomainError> {
        Ok(self.table.lock().rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> = self.table.lock().rows.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(products)
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> Result<Option<Product>, DomainError> {
        let mut table = self.table.lock();
        Ok(table.rows.get_mut(&id).map(|product| {
            product.name = draft.name;
            product.description = draft.description;
            product.price = draft.price;
            product.updated_at = OffsetDateTime::now_utc();
            product.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.table.lock().rows.remove(&id).is_some())
    }
}
