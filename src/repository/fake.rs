//! In-memory stand-in for the stored procedures, used by handler tests.
//!
//! Replies go through [`Procedure::classify`] exactly like the MySQL store, so
//! tests exercise the real code-to-status mapping.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use actix_web::web;

use crate::model::role::{CreateRole, Role, RolePage, UpdateRole};
use crate::model::user::{CreateUser, UpdateUser, User};
use crate::model::variable::{CreateVariable, UpdateVariable, Variable};
use crate::procedure::{Procedure, codes};

use super::{RoleRepository, StoreResult, UserRepository, VariableRepository};

// Validation codes the fake procedures report. The real store has its own.
pub const ROLE_NAME_REQUIRED: i64 = 1001;
pub const ROLE_NAME_TAKEN: i64 = 1002;
pub const ROLE_UPDATE_NAME_TAKEN: i64 = 3002;
pub const USER_NAME_REQUIRED: i64 = 5001;
pub const USER_NAME_TAKEN: i64 = 5002;
pub const USER_ROLE_UNKNOWN: i64 = 5003;
pub const VARIABLE_NAME_REQUIRED: i64 = 9001;
pub const VARIABLE_NAME_TAKEN: i64 = 9002;
pub const BAD_PAGE: i64 = 13001;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReadFault {
    /// `p_resultado = 0` without a row.
    EmptySuccess,
    /// Any unreserved non-zero code.
    Code(i64),
}

#[derive(Default)]
struct State {
    next_id: i64,
    roles: BTreeMap<i64, String>,
    users: BTreeMap<i64, CreateUser>,
    variables: BTreeMap<i64, CreateVariable>,
    users_with_dependents: HashSet<i64>,
    read_fault: Option<ReadFault>,
    delete_fault: Option<i64>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn role_row(&self, id: i64) -> Option<Role> {
        self.roles.get(&id).map(|name| Role {
            id,
            name: Some(name.clone()),
            user_count: Some(
                self.users
                    .values()
                    .filter(|u| u.role_id == Some(id))
                    .count() as i64,
            ),
        })
    }

    fn user_row(&self, id: i64) -> Option<User> {
        self.users.get(&id).map(|u| User {
            id,
            username: Some(u.username.clone()),
            email: u.email.clone(),
            role_id: u.role_id,
            role_name: u.role_id.and_then(|r| self.roles.get(&r).cloned()),
        })
    }

    fn variable_row(&self, id: i64) -> Option<Variable> {
        self.variables.get(&id).map(|v| Variable {
            id,
            name: Some(v.name.clone()),
            value: Some(v.value.clone()),
            kind: v.kind.clone(),
        })
    }
}

#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
    calls: AtomicUsize,
}

impl FakeStore {
    pub fn shared() -> web::Data<Self> {
        web::Data::new(Self::default())
    }

    /// Number of procedure calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_read_fault(&self, fault: Option<ReadFault>) {
        self.state().read_fault = fault;
    }

    /// Makes every delete procedure report `code` instead of touching state.
    pub fn set_delete_fault(&self, code: Option<i64>) {
        self.state().delete_fault = code;
    }

    pub fn add_user_dependents(&self, user_id: i64) {
        self.state().users_with_dependents.insert(user_id);
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn reply<T>(&self, procedure: Procedure, code: i64, message: &str, payload: T) -> StoreResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(procedure.classify(code, message.to_string(), payload))
    }

    /// By-id / by-name lookups, honouring an injected fault.
    fn lookup<T>(
        &self,
        procedure: Procedure,
        row: Option<T>,
        not_found: i64,
    ) -> StoreResult<Option<T>> {
        let fault = self.state().read_fault;
        match (fault, row) {
            (Some(ReadFault::EmptySuccess), _) => self.reply(procedure, 0, "", None),
            (Some(ReadFault::Code(code)), _) => self.reply(procedure, code, "store unavailable", None),
            (None, Some(row)) => self.reply(procedure, 0, "", Some(row)),
            (None, None) => self.reply(procedure, not_found, "not found", None),
        }
    }

    fn page<T: Clone>(items: Vec<T>, offset: i64, limit: i64) -> Option<Vec<T>> {
        if offset < 0 || limit <= 0 {
            return None;
        }
        Some(
            items
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect(),
        )
    }
}

impl RoleRepository for FakeStore {
    async fn create(&self, input: &CreateRole) -> StoreResult<i64> {
        let procedure = Procedure::RolesCreate;
        let name = input.name.trim();
        let mut state = self.state();

        if name.is_empty() {
            drop(state);
            return self.reply(procedure, ROLE_NAME_REQUIRED, "role name is required", 0);
        }
        if state.roles.values().any(|n| n.eq_ignore_ascii_case(name)) {
            drop(state);
            return self.reply(procedure, ROLE_NAME_TAKEN, "role name already exists", 0);
        }

        let id = state.next_id();
        state.roles.insert(id, name.to_string());
        drop(state);
        self.reply(procedure, 0, "role created", id)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Role>> {
        let row = self.state().role_row(id);
        self.lookup(Procedure::RolesReadById, row, codes::ROLE_NOT_FOUND_ON_READ)
    }

    async fn list(&self, offset: i64, limit: i64) -> StoreResult<RolePage> {
        let state = self.state();
        let all: Vec<Role> = state.roles.keys().filter_map(|id| state.role_row(*id)).collect();
        drop(state);

        let total = all.len() as i64;
        match Self::page(all, offset, limit) {
            Some(roles) => self.reply(Procedure::RolesReadAll, 0, "", RolePage { roles, total }),
            None => self.reply(
                Procedure::RolesReadAll,
                BAD_PAGE,
                "invalid paging",
                RolePage { roles: Vec::new(), total: 0 },
            ),
        }
    }

    async fn update(&self, input: &UpdateRole) -> StoreResult<()> {
        let procedure = Procedure::RolesUpdate;
        let mut state = self.state();

        let (code, message) = if !state.roles.contains_key(&input.id) {
            (codes::ROLE_NOT_FOUND_ON_UPDATE, "role not found")
        } else if input.name.trim().is_empty() {
            (ROLE_NAME_REQUIRED, "role name is required")
        } else if state
            .roles
            .iter()
            .any(|(id, n)| *id != input.id && n.eq_ignore_ascii_case(input.name.trim()))
        {
            (ROLE_UPDATE_NAME_TAKEN, "role name already exists")
        } else {
            state.roles.insert(input.id, input.name.trim().to_string());
            (0, "role updated")
        };

        drop(state);
        self.reply(procedure, code, message, ())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let procedure = Procedure::RolesDelete;
        let mut state = self.state();

        let holders = state.users.values().filter(|u| u.role_id == Some(id)).count();
        let (code, message) = if let Some(code) = state.delete_fault {
            (code, "delete refused".to_string())
        } else if !state.roles.contains_key(&id) {
            (codes::ROLE_NOT_FOUND_ON_DELETE, "role not found".to_string())
        } else if holders > 0 {
            (
                codes::ROLE_HAS_USERS,
                format!("role cannot be deleted, it has {holders} users"),
            )
        } else {
            state.roles.remove(&id);
            (0, "role deleted".to_string())
        };

        drop(state);
        self.reply(procedure, code, &message, ())
    }
}

impl UserRepository for FakeStore {
    async fn create(&self, input: &CreateUser) -> StoreResult<i64> {
        let procedure = Procedure::UsersCreate;
        let mut state = self.state();

        let (code, message) = if input.username.trim().is_empty() {
            (USER_NAME_REQUIRED, "username is required")
        } else if state.users.values().any(|u| u.username == input.username) {
            (USER_NAME_TAKEN, "username already exists")
        } else if input.role_id.is_some_and(|r| !state.roles.contains_key(&r)) {
            (USER_ROLE_UNKNOWN, "role does not exist")
        } else {
            let id = state.next_id();
            state.users.insert(id, input.clone());
            drop(state);
            return self.reply(procedure, 0, "user created", id);
        };

        drop(state);
        self.reply(procedure, code, message, 0)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let row = self.state().user_row(id);
        self.lookup(Procedure::UsersReadById, row, codes::USER_NOT_FOUND_ON_READ)
    }

    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<User>> {
        let state = self.state();
        let all: Vec<User> = state.users.keys().filter_map(|id| state.user_row(*id)).collect();
        drop(state);

        match Self::page(all, offset, limit) {
            Some(users) => self.reply(Procedure::UsersReadAll, 0, "", users),
            None => self.reply(Procedure::UsersReadAll, BAD_PAGE, "invalid paging", Vec::new()),
        }
    }

    async fn update(&self, input: &UpdateUser) -> StoreResult<()> {
        let procedure = Procedure::UsersUpdate;
        let mut state = self.state();

        let (code, message) = if !state.users.contains_key(&input.id) {
            (codes::USER_NOT_FOUND_ON_UPDATE, "user not found")
        } else if input.username.trim().is_empty() {
            (USER_NAME_REQUIRED, "username is required")
        } else if input.role_id.is_some_and(|r| !state.roles.contains_key(&r)) {
            (USER_ROLE_UNKNOWN, "role does not exist")
        } else {
            state.users.insert(
                input.id,
                CreateUser {
                    username: input.username.clone(),
                    email: input.email.clone(),
                    role_id: input.role_id,
                },
            );
            (0, "user updated")
        };

        drop(state);
        self.reply(procedure, code, message, ())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let procedure = Procedure::UsersDelete;
        let mut state = self.state();

        let (code, message) = if let Some(code) = state.delete_fault {
            (code, "delete refused")
        } else if !state.users.contains_key(&id) {
            (codes::USER_NOT_FOUND_ON_DELETE, "user not found")
        } else if state.users_with_dependents.contains(&id) {
            (codes::USER_HAS_DEPENDENTS, "user is still referenced")
        } else {
            state.users.remove(&id);
            (0, "user deleted")
        };

        drop(state);
        self.reply(procedure, code, message, ())
    }
}

impl VariableRepository for FakeStore {
    async fn create(&self, input: &CreateVariable) -> StoreResult<i64> {
        let procedure = Procedure::VariablesCreate;
        let mut state = self.state();

        let (code, message) = if input.name.trim().is_empty() {
            (VARIABLE_NAME_REQUIRED, "variable name is required")
        } else if state.variables.values().any(|v| v.name == input.name) {
            (VARIABLE_NAME_TAKEN, "variable name already exists")
        } else {
            let id = state.next_id();
            state.variables.insert(id, input.clone());
            drop(state);
            return self.reply(procedure, 0, "variable created", id);
        };

        drop(state);
        self.reply(procedure, code, message, 0)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Variable>> {
        let row = self.state().variable_row(id);
        self.lookup(Procedure::VariablesReadById, row, codes::VARIABLE_NOT_FOUND_ON_READ)
    }

    async fn get_by_name(&self, name: &str) -> StoreResult<Option<Variable>> {
        let state = self.state();
        let row = state
            .variables
            .iter()
            .find(|(_, v)| v.name == name)
            .and_then(|(id, _)| state.variable_row(*id));
        drop(state);

        self.lookup(Procedure::VariablesReadByName, row, codes::VARIABLE_NOT_FOUND_BY_NAME)
    }

    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Variable>> {
        let state = self.state();
        let all: Vec<Variable> = state
            .variables
            .keys()
            .filter_map(|id| state.variable_row(*id))
            .collect();
        drop(state);

        match Self::page(all, offset, limit) {
            Some(variables) => self.reply(Procedure::VariablesReadAll, 0, "", variables),
            None => self.reply(Procedure::VariablesReadAll, BAD_PAGE, "invalid paging", Vec::new()),
        }
    }

    async fn update(&self, input: &UpdateVariable) -> StoreResult<()> {
        let procedure = Procedure::VariablesUpdate;
        let mut state = self.state();

        let (code, message) = if !state.variables.contains_key(&input.id) {
            (codes::VARIABLE_NOT_FOUND_ON_UPDATE, "variable not found")
        } else if input.name.trim().is_empty() {
            (VARIABLE_NAME_REQUIRED, "variable name is required")
        } else {
            state.variables.insert(
                input.id,
                CreateVariable {
                    name: input.name.clone(),
                    value: input.value.clone(),
                    kind: input.kind.clone(),
                },
            );
            (0, "variable updated")
        };

        drop(state);
        self.reply(procedure, code, message, ())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let procedure = Procedure::VariablesDelete;
        let mut state = self.state();
        if let Some(code) = state.delete_fault {
            drop(state);
            return self.reply(procedure, code, "delete refused", ());
        }
        let removed = state.variables.remove(&id).is_some();
        drop(state);

        if removed {
            self.reply(procedure, 0, "variable deleted", ())
        } else {
            self.reply(
                procedure,
                codes::VARIABLE_NOT_FOUND_ON_DELETE,
                "variable not found",
                (),
            )
        }
    }
}
