//! Blocking query runner.

use futures::executor::block_on;
use futures::TryStreamExt;
use meridian_array::batch::Batch;
use meridian_array::format::format_scalar;
use meridian_error::{MeridianError, OptionExt, Result};
use meridian_execution::engine::session::Session;
use meridian_execution::engine::Engine;
use meridian_execution::extension::Extension;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::result::MaterializedResult;

/// Runner owning an engine and a session for tests to query against.
///
/// Queries run to completion and come back as a [`MaterializedResult`].
#[derive(Debug)]
pub struct QueryRunner {
    engine: Engine,
    session: Session,
    closed: bool,
}

impl QueryRunner {
    pub fn builder() -> QueryRunnerBuilder {
        QueryRunnerBuilder {
            extensions: Vec::new(),
        }
    }

    /// Run a single statement to completion.
    pub fn query(&mut self, sql: &str) -> Result<MaterializedResult> {
        if self.closed {
            return Err(MeridianError::new("Query runner is closed"));
        }
        info!(%sql, "query");

        let mut results = self.session.simple(sql)?;
        if results.len() != 1 {
            return Err(MeridianError::new(format!(
                "Unexpected number of results for '{sql}': {}",
                results.len()
            )));
        }
        let result = results.remove(0);

        let types = result
            .output_schema
            .fields
            .iter()
            .map(|field| field.datatype.to_string())
            .collect();

        let batches: Vec<Batch> = block_on(result.stream.try_collect())?;
        let mut rows = Vec::new();
        for batch in batches {
            for idx in 0..batch.num_rows() {
                let row = batch.row(idx).required("row in bounds for batch")?;
                rows.push(row.iter().map(format_scalar).collect::<Result<Vec<_>>>()?);
            }
        }

        Ok(MaterializedResult { types, rows })
    }

    /// Close the runner. Further queries error, as does a second close.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(MeridianError::new("Query runner already closed"));
        }
        self.closed = true;
        Ok(())
    }
}

/// Close the runner after `error` interrupted setup, keeping `error` as the
/// one reported.
///
/// A failure to close gets attached to the original error as a suppressed
/// error rather than replacing it.
pub fn close_all_suppress(mut error: MeridianError, mut runner: QueryRunner) -> MeridianError {
    if let Err(close_err) = runner.close() {
        error.add_suppressed(close_err);
    }
    error
}

#[derive(Debug, Default)]
pub struct QueryRunnerBuilder {
    extensions: Vec<Box<dyn Extension>>,
}

impl QueryRunnerBuilder {
    pub fn with_extension(mut self, extension: Box<dyn Extension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Build the runner, installing all extensions.
    ///
    /// If installing an extension fails, the already constructed runner is
    /// closed and the install error returned with any close failure attached
    /// as a suppressed error.
    pub fn build(self) -> Result<QueryRunner> {
        init_test_tracing();

        let engine = Engine::new()?;
        let session = engine.new_session()?;
        let runner = QueryRunner {
            engine,
            session,
            closed: false,
        };

        for extension in self.extensions {
            if let Err(err) = runner.engine.register_extension(extension) {
                return Err(close_all_suppress(err, runner));
            }
        }

        Ok(runner)
    }
}

/// Set up tracing for tests, logging at the ERROR level by default.
///
/// RUST_LOG can be used to log at a lower level. Later calls in the same
/// process keep the subscriber from the first call.
fn init_test_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::ERROR.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_test_writer()
        .with_env_filter(env_filter)
        .with_file(true)
        .with_line_number(true)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
