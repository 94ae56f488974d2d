/// Ontology namespace every converter mints identifiers under
pub const DEFAULT_BASE_IRI: &str = "http://example.org/university#";

/// Prefix registered for the namespace in serialized Turtle
pub const GRAPH_PREFIX: &str = "uni";

/// Default contacts CSV source
pub const DEFAULT_CSV_SOURCE: &str = "student_contacts.csv";

/// Default Turtle dump for the CSV converter
pub const DEFAULT_CSV_OUTPUT: &str = "data/csv_dump.ttl";

/// Default SQLite database source
pub const DEFAULT_DB_SOURCE: &str = "university.db";

/// Default Turtle dump for the SQLite converter
pub const DEFAULT_DB_OUTPUT: &str = "data/sqlite_dump.ttl";

/// Default course catalog XML source
pub const DEFAULT_XML_SOURCE: &str = "course_catalog.xml";

/// Default Turtle dump for the XML converter
pub const DEFAULT_XML_OUTPUT: &str = "data/xml_dump.ttl";

/// Query endpoint of the external SPARQL engine
pub const DEFAULT_SPARQL_ENDPOINT: &str = "http://localhost:3030/university/query";

/// Bind address for the query proxy
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Per-request timeout when forwarding a query to the engine
pub const QUERY_TIMEOUT_SECS: u64 = 10;
