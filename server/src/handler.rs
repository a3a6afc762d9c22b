use driver::database::{InMemoryBookRepository, InMemoryDatabase};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use std::ops::Deref;
use std::sync::Arc;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub fn new() -> Self {
        Self::from(Handler::init())
    }
}

impl Default for AppModule {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Handler> for AppModule {
    fn from(handler: Handler) -> Self {
        Self(Arc::new(handler))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    database: InMemoryDatabase,
}

impl Handler {
    pub fn init() -> Self {
        Self::with_database(InMemoryDatabase::new())
    }

    pub fn with_database(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = InMemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self.database()
    }
}

impl DependOnBookQuery for Handler {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for Handler {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}
