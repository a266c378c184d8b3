//! Account service: sign-up and sign-in use cases

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::country::{Country, CountryId, CountryRepository};
use crate::domain::user::{NewUser, User, UserRepository};
use crate::domain::validation::{validate, FieldErrors, FormParams, RuleSet, Validation};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Field rules for the sign-up form, in display order
pub const SIGN_UP_RULES: &[(&str, &str)] = &[
    ("email", "required|email"),
    ("login", "required|min:6"),
    ("password", "required|min:6"),
    ("password2", "required|same:password"),
    ("country_id", "required"),
    ("agree", "required"),
];

/// Confirmation and consent fields that are validated but never stored
pub const SIGN_UP_EXCLUDED: &[&str] = &["password2", "agree"];

pub const LOGIN_TAKEN: &str = "Login must be unique";
pub const EMAIL_TAKEN: &str = "Email must be unique";
pub const INCORRECT_COUNTRY: &str = "Incorrect country";

/// Outcome of a sign-up attempt
#[derive(Debug)]
pub enum Registration {
    /// The account was stored
    Created(User),
    /// The form must be shown again with these errors
    Rejected(FieldErrors),
}

/// Registration and credential checks over the user and country stores
#[derive(Debug)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    countries: Arc<dyn CountryRepository>,
    hasher: Arc<dyn PasswordHasher>,
    sign_up_rules: RuleSet,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        countries: Arc<dyn CountryRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Result<Self, DomainError> {
        let sign_up_rules = RuleSet::parse(SIGN_UP_RULES.iter().copied())
            .map_err(|e| DomainError::configuration(format!("Invalid sign-up rules: {}", e)))?;

        Ok(Self {
            users,
            countries,
            hasher,
            sign_up_rules,
        })
    }

    /// Countries offered on the sign-up form
    pub async fn countries(&self) -> Result<Vec<Country>, DomainError> {
        self.countries.list().await
    }

    /// Validate a sign-up form and create the account when it is clean.
    ///
    /// Store checks run after the rule checks and only fill fields that have
    /// no error yet, so every problem is reported in one pass.
    pub async fn register(&self, params: &FormParams) -> Result<Registration, DomainError> {
        let Validation { clean, mut errors } =
            validate(params, &self.sign_up_rules, SIGN_UP_EXCLUDED);

        if !errors.contains_key("login") {
            if let Some(login) = clean.get("login") {
                if self.users.login_exists(login).await? {
                    errors.insert("login".to_string(), LOGIN_TAKEN.to_string());
                }
            }
        }

        if !errors.contains_key("email") {
            if let Some(email) = clean.get("email") {
                if self.users.email_exists(email).await? {
                    errors.insert("email".to_string(), EMAIL_TAKEN.to_string());
                }
            }
        }

        let mut country_id = None;

        if !errors.contains_key("country_id") {
            let parsed = clean.get("country_id").and_then(|raw| CountryId::parse(raw));
            let known = match parsed {
                Some(id) => self.countries.exists(id).await?,
                None => false,
            };

            if known {
                country_id = parsed;
            } else {
                errors.insert("country_id".to_string(), INCORRECT_COUNTRY.to_string());
            }
        }

        let country_id = match country_id {
            Some(id) if errors.is_empty() => id,
            _ => {
                debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Sign-up rejected");
                return Ok(Registration::Rejected(errors));
            }
        };

        let field = |name: &str| clean.get(name).cloned().unwrap_or_default();

        let new_user = NewUser {
            login: field("login"),
            email: field("email"),
            password_hash: self.hasher.hash(&field("password"))?,
            country_id,
        };

        match self.users.create(new_user).await {
            Ok(user) => {
                info!(user_id = %user.id(), login = %user.login(), "User registered");
                Ok(Registration::Created(user))
            }
            Err(DomainError::FieldConflict { field, message }) => {
                debug!(field = %field, message = %message, "Sign-up lost a uniqueness race");

                let mut errors = FieldErrors::new();
                errors.insert(field.clone(), conflict_message(&field).to_string());

                Ok(Registration::Rejected(errors))
            }
            Err(e) => Err(e),
        }
    }

    /// Find the account matching `login` (as login, then as email) and `password`.
    ///
    /// A login match is tried first; the email lookup only runs when it fails.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        if let Some(user) = self.users.find_by_login(login).await? {
            if self.hasher.verify(password, user.password_hash()) {
                return Ok(Some(user));
            }
        }

        if let Some(user) = self.users.find_by_email(login).await? {
            if self.hasher.verify(password, user.password_hash()) {
                return Ok(Some(user));
            }
        }

        Ok(None)
    }
}

fn conflict_message(field: &str) -> &'static str {
    match field {
        "login" => LOGIN_TAKEN,
        "email" => EMAIL_TAKEN,
        _ => INCORRECT_COUNTRY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::country::MockCountryRepository;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::country::InMemoryCountryRepository;
    use crate::infrastructure::user::password::Argon2Hasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn params(pairs: &[(&str, &str)]) -> FormParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_form(login: &str, email: &str) -> FormParams {
        params(&[
            ("email", email),
            ("login", login),
            ("password", "secret1"),
            ("password2", "secret1"),
            ("country_id", "3"),
            ("agree", "on"),
        ])
    }

    fn service_with(users: Arc<InMemoryUserRepository>) -> AccountService {
        AccountService::new(
            users,
            Arc::new(InMemoryCountryRepository::default()),
            Arc::new(Argon2Hasher::new()),
        )
        .unwrap()
    }

    fn rejected(registration: Registration) -> FieldErrors {
        match registration {
            Registration::Rejected(errors) => errors,
            Registration::Created(user) => panic!("unexpected user {}", user.login()),
        }
    }

    #[tokio::test]
    async fn test_register_creates_user_from_clean_fields() {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = service_with(users.clone());

        let registration = service
            .register(&valid_form("bobby1", "bob@example.com"))
            .await
            .unwrap();

        let Registration::Created(user) = registration else {
            panic!("expected a created user");
        };

        assert_eq!(user.login(), "bobby1");
        assert_eq!(user.email(), "bob@example.com");
        assert_eq!(user.country_id(), CountryId::new(3));
        assert_ne!(user.password_hash(), "secret1");
        assert!(Argon2Hasher::new().verify("secret1", user.password_hash()));
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_missing_email() {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = service_with(users.clone());

        let mut form = valid_form("bobby1", "bob@example.com");
        form.remove("email");

        let errors = rejected(service.register(&form).await.unwrap());

        assert!(errors.contains_key("email"));
        assert!(users.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_duplicate_login() {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = service_with(users.clone());

        service
            .register(&valid_form("existing", "first@example.com"))
            .await
            .unwrap();

        let errors = rejected(
            service
                .register(&valid_form("existing", "second@example.com"))
                .await
                .unwrap(),
        );

        assert_eq!(errors.get("login"), Some(&LOGIN_TAKEN.to_string()));
        assert_eq!(errors.len(), 1);
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_reports_every_error_at_once() {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = service_with(users.clone());

        service
            .register(&valid_form("existing", "taken@example.com"))
            .await
            .unwrap();

        let mut form = valid_form("existing", "taken@example.com");
        form.insert("country_id".to_string(), "999".to_string());
        form.remove("agree");

        let errors = rejected(service.register(&form).await.unwrap());

        assert_eq!(errors.get("login"), Some(&LOGIN_TAKEN.to_string()));
        assert_eq!(errors.get("email"), Some(&EMAIL_TAKEN.to_string()));
        assert_eq!(errors.get("country_id"), Some(&INCORRECT_COUNTRY.to_string()));
        assert_eq!(errors.get("agree"), Some(&"The Agree is required".to_string()));
    }

    #[tokio::test]
    async fn test_structural_error_wins_over_store_check() {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = service_with(users);

        let mut form = valid_form("bobby1", "bob@example.com");
        form.insert("country_id".to_string(), "  ".to_string());

        let errors = rejected(service.register(&form).await.unwrap());
        assert_eq!(
            errors.get("country_id"),
            Some(&"The Country id is required".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_numeric_country_is_incorrect() {
        let service = service_with(Arc::new(InMemoryUserRepository::new()));

        let mut form = valid_form("bobby1", "bob@example.com");
        form.insert("country_id".to_string(), "France".to_string());

        let errors = rejected(service.register(&form).await.unwrap());
        assert_eq!(errors.get("country_id"), Some(&INCORRECT_COUNTRY.to_string()));
    }

    #[tokio::test]
    async fn test_insert_conflict_becomes_field_error() {
        let mut users = MockUserRepository::new();
        users.expect_login_exists().returning(|_| Ok(false));
        users.expect_email_exists().returning(|_| Ok(false));
        users
            .expect_create()
            .times(1)
            .returning(|_| Err(DomainError::field_conflict("email", "taken meanwhile")));

        let service = AccountService::new(
            Arc::new(users),
            Arc::new(InMemoryCountryRepository::default()),
            Arc::new(Argon2Hasher::new()),
        )
        .unwrap();

        let errors = rejected(
            service
                .register(&valid_form("bobby1", "bob@example.com"))
                .await
                .unwrap(),
        );

        assert_eq!(errors.get("email"), Some(&EMAIL_TAKEN.to_string()));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut countries = MockCountryRepository::new();
        countries
            .expect_exists()
            .returning(|_| Err(DomainError::storage("connection reset")));

        let service = AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(countries),
            Arc::new(Argon2Hasher::new()),
        )
        .unwrap();

        let result = service
            .register(&valid_form("bobby1", "bob@example.com"))
            .await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_by_login_or_email() {
        let service = service_with(Arc::new(InMemoryUserRepository::new()));
        service
            .register(&valid_form("bobby1", "bob@example.com"))
            .await
            .unwrap();

        let by_login = service.authenticate("bobby1", "secret1").await.unwrap();
        assert_eq!(by_login.unwrap().login(), "bobby1");

        let by_email = service
            .authenticate("bob@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(by_email.unwrap().login(), "bobby1");

        assert!(service.authenticate("bobby1", "wrong1").await.unwrap().is_none());
        assert!(service.authenticate("nobody", "secret1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_match_takes_precedence_over_email_match() {
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Argon2Hasher::new();

        users
            .create(NewUser {
                login: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password_hash: hasher.hash("secret").unwrap(),
                country_id: CountryId::new(1),
            })
            .await
            .unwrap();
        users
            .create(NewUser {
                login: "robert".to_string(),
                email: "bob".to_string(),
                password_hash: hasher.hash("secret").unwrap(),
                country_id: CountryId::new(1),
            })
            .await
            .unwrap();

        let service = service_with(users);

        let user = service.authenticate("bob", "secret").await.unwrap().unwrap();
        assert_eq!(user.login(), "bob");
        assert_eq!(user.email(), "bob@example.com");
    }

    #[tokio::test]
    async fn test_email_path_used_when_login_password_mismatch() {
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Argon2Hasher::new();

        users
            .create(NewUser {
                login: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password_hash: hasher.hash("first1").unwrap(),
                country_id: CountryId::new(1),
            })
            .await
            .unwrap();
        users
            .create(NewUser {
                login: "robert".to_string(),
                email: "bob".to_string(),
                password_hash: hasher.hash("second").unwrap(),
                country_id: CountryId::new(1),
            })
            .await
            .unwrap();

        let service = service_with(users);

        let user = service.authenticate("bob", "second").await.unwrap().unwrap();
        assert_eq!(user.login(), "robert");
    }
}
