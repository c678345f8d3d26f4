use contacts_persistence_sea_orm::{connect, create_tables};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("CONTACTS_DATABASE_URL").expect("CONTACTS_DATABASE_URL must be set");

    let pool = connect(&database_url, 1)
        .await
        .expect("Failed to connect to database");

    create_tables(&pool)
        .await
        .expect("Failed to create contacts table");

    println!("Created database tables successfully");
}
