//! Recording `DatabaseAdmin` double shared by the use case tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::gateways::DatabaseAdmin;
use crate::shared::errors::AdminError;

/// A single call made against the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCall {
    CreateRole(String),
    GrantRole { role: String, grantee: String },
    CreateDatabase { database: String, owner: String },
    DisallowConnections(String),
    TerminateConnections(String),
    DropDatabase(String),
    DropRole(String),
    Ping,
}

impl AdminCall {
    fn name(&self) -> &'static str {
        match self {
            Self::CreateRole(_) => "create_role",
            Self::GrantRole { .. } => "grant_role",
            Self::CreateDatabase { .. } => "create_database",
            Self::DisallowConnections(_) => "disallow_connections",
            Self::TerminateConnections(_) => "terminate_connections",
            Self::DropDatabase(_) => "drop_database",
            Self::DropRole(_) => "drop_role",
            Self::Ping => "ping",
        }
    }
}

pub struct MockDatabaseAdmin {
    calls: Mutex<Vec<AdminCall>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl MockDatabaseAdmin {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Make every call of the named operation fail
    pub fn failing_on(self, operation: &'static str) -> Self {
        self.failing.lock().unwrap().insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<AdminCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: AdminCall) -> Result<(), AdminError> {
        let name = call.name();
        self.calls.lock().unwrap().push(call);

        if self.failing.lock().unwrap().contains(name) {
            Err(AdminError::Database(sqlx::Error::Protocol(format!("{name} failed"))))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DatabaseAdmin for MockDatabaseAdmin {
    async fn create_role(&self, role: &str, _password: &str) -> Result<(), AdminError> {
        self.record(AdminCall::CreateRole(role.to_string()))
    }

    async fn grant_role(&self, role: &str, grantee: &str) -> Result<(), AdminError> {
        self.record(AdminCall::GrantRole {
            role: role.to_string(),
            grantee: grantee.to_string(),
        })
    }

    async fn create_database(&self, database: &str, owner: &str) -> Result<(), AdminError> {
        self.record(AdminCall::CreateDatabase {
            database: database.to_string(),
            owner: owner.to_string(),
        })
    }

    async fn disallow_connections(&self, database: &str) -> Result<(), AdminError> {
        self.record(AdminCall::DisallowConnections(database.to_string()))
    }

    async fn terminate_connections(&self, database: &str) -> Result<(), AdminError> {
        self.record(AdminCall::TerminateConnections(database.to_string()))
    }

    async fn drop_database(&self, database: &str) -> Result<(), AdminError> {
        self.record(AdminCall::DropDatabase(database.to_string()))
    }

    async fn drop_role(&self, role: &str) -> Result<(), AdminError> {
        self.record(AdminCall::DropRole(role.to_string()))
    }

    async fn ping(&self) -> Result<(), AdminError> {
        self.record(AdminCall::Ping)
    }
}
