use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;

use crate::{
    domain::contact::{Contact, NewContact, Role, UpdateContact},
    repository::{
        ContactListQuery, ContactReader, ContactWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// OR-filter over every searchable column. SQLite `LIKE` is
/// case-insensitive for ASCII, matching the store contract.
fn search_filter(
    pattern: &str,
) -> Box<dyn BoxableExpression<crate::schema::contacts::table, Sqlite, SqlType = Bool>> {
    use crate::schema::contacts;

    Box::new(
        contacts::name
            .like(pattern.to_string())
            .or(contacts::email.like(pattern.to_string()))
            .or(contacts::phone.like(pattern.to_string()))
            .or(contacts::address.like(pattern.to_string()))
            .or(contacts::contact_type.like(pattern.to_string()))
            .or(contacts::role.like(pattern.to_string())),
    )
}

impl ContactReader for DieselRepository {
    fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Contact>> {
        use crate::models::contact::Contact as DbContact;
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let contact = contacts::table
            .find(id)
            .first::<DbContact>(&mut conn)
            .optional()?;

        match contact {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    fn get_by_email_and_role(&self, email: &str, role: Role) -> RepositoryResult<Option<Contact>> {
        use crate::models::contact::Contact as DbContact;
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let contact = contacts::table
            .filter(contacts::email.eq(email))
            .filter(contacts::role.eq(role.as_str()))
            .first::<DbContact>(&mut conn)
            .optional()?;

        match contact {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    fn list(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)> {
        use crate::models::contact::Contact as DbContact;
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let pattern = query.search.as_ref().map(|term| format!("%{term}%"));

        let total: i64 = match &pattern {
            Some(pattern) => contacts::table
                .filter(search_filter(pattern))
                .count()
                .get_result(&mut conn)?,
            None => contacts::table.count().get_result(&mut conn)?,
        };

        let mut items_query = contacts::table.into_boxed();
        if let Some(pattern) = &pattern {
            items_query = items_query.filter(search_filter(pattern));
        }
        items_query = items_query.order(contacts::id.desc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Contact>, _>>()?;

        Ok((total as usize, items))
    }
}

impl ContactWriter for DieselRepository {
    fn create(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        use crate::models::contact::{Contact as DbContact, NewContact as DbNewContact};
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let insertable: DbNewContact = new_contact.into();
        let created = diesel::insert_into(contacts::table)
            .values(&insertable)
            .get_result::<DbContact>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update(
        &self,
        contact_id: i32,
        expected_version: i32,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact> {
        use crate::models::contact::{Contact as DbContact, UpdateContact as DbUpdateContact};
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        let db_updates: DbUpdateContact = updates.into();

        conn.transaction::<Contact, RepositoryError, _>(|conn| {
            let updated = diesel::update(
                contacts::table
                    .find(contact_id)
                    .filter(contacts::version.eq(expected_version)),
            )
            .set((&db_updates, contacts::version.eq(expected_version + 1)))
            .get_result::<DbContact>(conn)
            .optional()?;

            match updated {
                Some(row) => Ok(row.try_into()?),
                None => {
                    let exists: i64 = contacts::table
                        .find(contact_id)
                        .count()
                        .get_result(conn)?;
                    if exists > 0 {
                        Err(RepositoryError::Stale)
                    } else {
                        Err(RepositoryError::NotFound)
                    }
                }
            }
        })
    }

    fn delete(&self, contact_id: i32) -> RepositoryResult<()> {
        use crate::schema::contacts;

        let mut conn = self.pool().get()?;
        diesel::delete(contacts::table.find(contact_id)).execute(&mut conn)?;
        Ok(())
    }
}
