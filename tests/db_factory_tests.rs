mod support;

use clinic_rust::db::repository::ConnectionCheck;
use clinic_rust::db::{RepositoryBuilder, RepositoryFactory, RepositoryType};
use support::with_scoped_env;

#[test]
fn repository_type_defaults_to_local_without_configuration() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn repository_type_prefers_explicit_setting() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("postgres")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres);
        },
    );
}

#[test]
fn database_url_implies_postgres() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/clinic")),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres);
        },
    );
}

#[test]
fn unknown_repository_type_falls_back_to_local() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("oracle")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[tokio::test]
async fn factory_creates_working_local_repository() {
    let repo = RepositoryFactory::create_local();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn builder_creates_local_repository() {
    let repo = RepositoryBuilder::new()
        .repository_type(RepositoryType::Local)
        .build()
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn postgres_without_feature_is_a_configuration_error() {
    let result = RepositoryFactory::create(RepositoryType::Postgres, None).await;
    assert!(result.is_err());
}
