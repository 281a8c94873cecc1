use sqlx::PgPool;

/// Sqlx-backed repositories. Each holds a cheap clone of the shared pool.
#[derive(Debug, Clone)]
pub struct SqlxArticleRepo {
    pub pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct SqlxProjectCategoryRepo {
    pub pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct SqlxTagRepo {
    pub pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct SqlxCertificateRepo {
    pub pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

impl SqlxArticleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SqlxProjectCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SqlxTagRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SqlxCertificateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SqlxUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
