#[cfg(test)]
pub mod test_db {
    use crate::db::{create_availability_slot, create_interviewer_profile, create_user};
    use crate::error::AppError;
    use crate::init_rocket;
    use crate::models::Role;
    use chrono::{DateTime, Utc};
    use rocket::local::asynchronous::Client;
    use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};
    use std::collections::HashMap;
    use std::sync::Once;
    use tracing::log::LevelFilter;

    static INIT: Once = Once::new();

    #[derive(Default)]
    pub struct TestDbBuilder {
        users: Vec<TestUser>,
        profiles: Vec<TestProfile>,
        slots: Vec<TestSlot>,
    }

    pub struct TestUser {
        pub name: String,
        pub role: Role,
        pub linkedin_url: Option<String>,
    }

    pub struct TestProfile {
        pub user_name: String,
        pub bio: String,
        pub expertise_tags: Vec<String>,
        pub years_exp: i64,
        pub verified: bool,
        pub rate_cents: i64,
    }

    pub struct TestSlot {
        pub user_name: String,
        pub start_time: DateTime<Utc>,
        pub end_time: DateTime<Utc>,
        pub is_recurring: bool,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn candidate(mut self, name: &str) -> Self {
            self.users.push(TestUser {
                name: name.to_string(),
                role: Role::Candidate,
                linkedin_url: None,
            });
            self
        }

        pub fn interviewer(mut self, name: &str, linkedin_url: Option<&str>) -> Self {
            self.users.push(TestUser {
                name: name.to_string(),
                role: Role::Interviewer,
                linkedin_url: linkedin_url.map(String::from),
            });
            self
        }

        pub fn user_with_role(mut self, name: &str, role: Role) -> Self {
            self.users.push(TestUser {
                name: name.to_string(),
                role,
                linkedin_url: None,
            });
            self
        }

        pub fn profile(
            mut self,
            user_name: &str,
            bio: &str,
            expertise_tags: &[&str],
            years_exp: i64,
            verified: bool,
            rate_cents: i64,
        ) -> Self {
            self.profiles.push(TestProfile {
                user_name: user_name.to_string(),
                bio: bio.to_string(),
                expertise_tags: expertise_tags.iter().map(|s| s.to_string()).collect(),
                years_exp,
                verified,
                rate_cents,
            });
            self
        }

        pub fn slot(
            mut self,
            user_name: &str,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            is_recurring: bool,
        ) -> Self {
            self.slots.push(TestSlot {
                user_name: user_name.to_string(),
                start_time,
                end_time,
                is_recurring,
            });
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = env_logger::builder()
                    .filter_level(LevelFilter::Debug)
                    .is_test(true)
                    .try_init();
            });

            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect("sqlite::memory:")
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;

            let mut user_id_map: HashMap<String, String> = HashMap::new();
            let mut profile_id_map: HashMap<String, String> = HashMap::new();

            for user in &self.users {
                let user_id = create_user(
                    &pool,
                    &user.name,
                    user.role,
                    user.linkedin_url.as_deref(),
                )
                .await?;

                user_id_map.insert(user.name.clone(), user_id);
            }

            for profile in &self.profiles {
                let user_id = user_id_map
                    .get(&profile.user_name)
                    .cloned()
                    .unwrap_or_default();

                let profile_id = create_interviewer_profile(
                    &pool,
                    &user_id,
                    &profile.bio,
                    &profile.expertise_tags,
                    profile.years_exp,
                    profile.verified,
                    profile.rate_cents,
                )
                .await?;

                profile_id_map.insert(profile.user_name.clone(), profile_id);
            }

            for slot in &self.slots {
                let profile_id = profile_id_map
                    .get(&slot.user_name)
                    .cloned()
                    .unwrap_or_default();

                create_availability_slot(
                    &pool,
                    &profile_id,
                    slot.start_time,
                    slot.end_time,
                    slot.is_recurring,
                )
                .await?;
            }

            Ok(TestDb {
                pool,
                user_id_map,
                profile_id_map,
            })
        }
    }

    pub struct TestDb {
        pub pool: Pool<Sqlite>,
        pub user_id_map: HashMap<String, String>,
        pub profile_id_map: HashMap<String, String>,
    }

    impl TestDb {
        pub fn user_id(&self, name: &str) -> Option<String> {
            self.user_id_map.get(name).cloned()
        }

        pub fn profile_id(&self, name: &str) -> Option<String> {
            self.profile_id_map.get(name).cloned()
        }
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        let rocket = init_rocket(test_db.pool.clone()).await;

        let client = Client::tracked(rocket)
            .await
            .expect("Failed to build test client");

        (client, test_db)
    }
}
