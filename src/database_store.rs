use crate::schema::key_values::{self, dsl::*};
use crate::store::{KeyValueStore, StoreError};
use diesel::{
    upsert::excluded, Connection, ConnectionError, ExpressionMethods, Insertable,
    OptionalExtension, PgConnection, QueryDsl, RunQueryDsl,
};
use std::sync::{Arc, Mutex};

#[derive(Insertable)]
#[diesel(table_name = key_values)]
struct NewEntry<'a> {
    store_key: &'a str,
    store_value: &'a str,
}

#[derive(Clone)]
pub struct DatabaseStore {
    connection: Arc<Mutex<PgConnection>>,
}

impl DatabaseStore {
    pub fn new(database_url: &str) -> Result<Self, ConnectionError> {
        let connection = Self::establish_connection(database_url)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn establish_connection(database_url: &str) -> Result<PgConnection, ConnectionError> {
        PgConnection::establish(database_url)
    }
}

impl KeyValueStore for DatabaseStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut connection = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        let value = key_values
            .find(key)
            .select(store_value)
            .first::<String>(&mut *connection)
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut connection = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        let entry = NewEntry {
            store_key: key,
            store_value: &value,
        };

        diesel::insert_into(key_values::table)
            .values(&entry)
            .on_conflict(store_key)
            .do_update()
            .set(store_value.eq(excluded(store_value)))
            .execute(&mut *connection)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut connection = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        diesel::delete(key_values.find(key)).execute(&mut *connection)?;
        Ok(())
    }
}
