//! Connection drivers.
//!
//! A [`Driver`] opens [`Session`]s from a [`ConnectOptions`] descriptor. A
//! handle opens exactly one session per operation and releases it before
//! returning, on success and on every error path; [`ScopedSession`] is the
//! guard that makes the release unconditional.

mod mysql;


pub use mysql::{MySqlDriver, MySqlSession};

use crate::config::ConnectOptions;
use crate::error::OrmResult;
use crate::row::Row;
use crate::value::Value;

/// Opens sessions for a connection descriptor.
pub trait Driver: Send + Sync {
    type Session: Session;

    fn open(&self, options: &ConnectOptions) -> OrmResult<Self::Session>;
}

/// One live database session.
pub trait Session {
    /// Execute `sql` with positional `params` and return every row produced.
    /// Statements without a result set return an empty vector.
    fn execute(&mut self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>>;

    fn commit(&mut self) -> OrmResult<()>;

    /// Release the session. Calling it again is a no-op.
    fn close(&mut self) -> OrmResult<()>;
}

impl<D: Driver + ?Sized> Driver for &D {
    type Session = D::Session;

    fn open(&self, options: &ConnectOptions) -> OrmResult<Self::Session> {
        (**self).open(options)
    }
}

impl<D: Driver + ?Sized> Driver for std::sync::Arc<D> {
    type Session = D::Session;

    fn open(&self, options: &ConnectOptions) -> OrmResult<Self::Session> {
        (**self).open(options)
    }
}

/// A session that is closed when the guard goes out of scope.
///
/// [`ScopedSession::close`] closes explicitly and reports the outcome; if the
/// guard is dropped first (an earlier step failed), `Drop` closes the
/// session and logs a close failure instead of returning it.
pub struct ScopedSession<S: Session> {
    session: S,
    closed: bool,
}

impl<S: Session> ScopedSession<S> {
    pub fn open<D>(driver: &D, options: &ConnectOptions) -> OrmResult<Self>
    where
        D: Driver<Session = S> + ?Sized,
    {
        let session = driver.open(options)?;
        tracing::trace!(target: "myorm.session", "session opened");
        Ok(Self {
            session,
            closed: false,
        })
    }

    pub fn execute(&mut self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>> {
        self.session.execute(sql, params)
    }

    pub fn commit(&mut self) -> OrmResult<()> {
        self.session.commit()
    }

    pub fn close(mut self) -> OrmResult<()> {
        self.closed = true;
        tracing::trace!(target: "myorm.session", "session closed");
        self.session.close()
    }
}

impl<S: Session> Drop for ScopedSession<S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.session.close() {
            tracing::debug!(target: "myorm.session", error = %e, "closing session after failure");
        } else {
            tracing::trace!(target: "myorm.session", "session closed after failure");
        }
    }
}
