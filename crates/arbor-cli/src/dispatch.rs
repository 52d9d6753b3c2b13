//! Running one command line: registry, action, transport, formatter.

use std::io::Write;

use tracing::{debug, warn};

use crate::client::{checked, Transport};
use crate::commands;
use crate::error::CliError;
use crate::lookup::HttpLookup;
use crate::output::OutputFormat;
use crate::registry::{self, Resolution};
use crate::request::RequestDescriptor;

/// Execute `descriptor` and render the result.
///
/// Application errors are rendered too when JSON output is selected, so
/// scripts see the server's envelope, and then returned.
///
/// # Errors
///
/// Returns transport, server and output errors.
pub async fn perform<T, W>(
    transport: &T,
    descriptor: &RequestDescriptor,
    format: &OutputFormat,
    writer: &mut W,
) -> Result<(), CliError>
where
    T: Transport,
    W: Write,
{
    let result = transport
        .send(
            descriptor.method,
            &descriptor.path,
            descriptor.body.as_ref(),
        )
        .await?;
    if result.is_error() {
        warn!(
            code = result.status_code,
            path = %descriptor.path,
            "Server reported an error"
        );
        if format.is_json() {
            format.render(writer, &result, descriptor.render)?;
        }
        checked(result)?;
        return Ok(());
    }
    format.render(writer, &result, descriptor.render)
}

/// Resolve `tokens` to a command, build its request and perform it.
///
/// # Errors
///
/// Returns a usage error when the tokens name no command, otherwise the
/// first error of building or performing the request.
pub async fn run_command<T, W>(
    tokens: &[String],
    transport: &T,
    format: &OutputFormat,
    writer: &mut W,
) -> Result<(), CliError>
where
    T: Transport,
    W: Write,
{
    match registry::resolve(tokens) {
        Resolution::Leaf {
            action, path, args, ..
        } => {
            debug!(command = %path.join(" "), "Dispatching");
            let lookup = HttpLookup::new(transport);
            let descriptor = commands::build(action, args, &lookup).await?;
            perform(transport, &descriptor, format, writer).await
        }
        Resolution::Partial {
            children,
            path,
            rest,
        } => Err(CliError::Usage(registry::usage(&path, children, rest))),
    }
}

/// Write completion candidates for `tokens`, one per line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn complete<W: Write>(tokens: &[String], writer: &mut W) -> Result<(), CliError> {
    for candidate in registry::candidates(tokens) {
        writeln!(writer, "{candidate}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use crate::client::fake::FakeTransport;
    use crate::request::{Method, RenderMode};
    use arbor_proto::{Environment, ServerResult};

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn ok() -> ServerResult {
        ServerResult {
            status_code: 200,
            status_text: "OK".into(),
            ..ServerResult::default()
        }
    }

    fn failed() -> ServerResult {
        ServerResult {
            status_code: 409,
            status_text: "Conflict".into(),
            errors: vec!["environment exists".into()],
            ..ServerResult::default()
        }
    }

    #[tokio::test]
    async fn runs_command_through_transport() {
        let transport = FakeTransport::new().respond(Method::PostBody, "/environment/", ok());
        let mut out = Vec::new();
        run_command(
            &toks("environments add qa"),
            &transport,
            &OutputFormat::default(),
            &mut out,
        )
        .await
        .unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::PostBody);
        assert_eq!(sent[0].path, "/environment/");
        assert_eq!(String::from_utf8(out).unwrap(), "✓ OK\n");
    }

    #[tokio::test]
    async fn list_renders_entities() {
        let result = ServerResult {
            environments: vec![Environment { name: "live".into() }],
            ..ok()
        };
        let transport = FakeTransport::new().respond(Method::Get, "/environment/", result);
        let mut out = Vec::new();
        run_command(
            &toks("environments list"),
            &transport,
            &OutputFormat::default(),
            &mut out,
        )
        .await
        .unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("live\n"));
    }

    #[tokio::test]
    async fn server_error_is_returned() {
        let transport = FakeTransport::new().respond(Method::PostBody, "/environment/", failed());
        let mut out = Vec::new();
        let err = run_command(
            &toks("environments add qa"),
            &transport,
            &OutputFormat::default(),
            &mut out,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "server error (409): environment exists");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn json_shows_failed_envelope() {
        let transport = FakeTransport::new().respond(Method::PostBody, "/environment/", failed());
        let mut out = Vec::new();
        let err = run_command(
            &toks("environments add qa"),
            &transport,
            &OutputFormat::new(Format::Json),
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Server { code: 409, .. }));
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["errors"][0], "environment exists");
    }

    #[tokio::test]
    async fn argument_errors_send_nothing() {
        let transport = FakeTransport::new();
        let mut out = Vec::new();
        let err = run_command(
            &toks("environments add"),
            &transport,
            &OutputFormat::default(),
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn incomplete_command_is_usage_error() {
        let transport = FakeTransport::new();
        let mut out = Vec::new();
        let err = run_command(&toks("groups"), &transport, &OutputFormat::default(), &mut out)
            .await
            .unwrap_err();
        let CliError::Usage(text) = err else {
            panic!("expected usage error, got {err:?}");
        };
        assert!(text.starts_with("'arboradm groups' needs a subcommand"));
    }

    #[tokio::test]
    async fn perform_renders_in_requested_mode() {
        let transport = FakeTransport::new().respond(Method::Get, "/instance/", ok());
        let descriptor = RequestDescriptor::get("/instance/", RenderMode::List);
        let mut out = Vec::new();
        perform(&transport, &descriptor, &OutputFormat::default(), &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No results\n");
    }

    #[test]
    fn complete_writes_lines() {
        let mut out = Vec::new();
        complete(&toks("teams"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "list\nshow\n");
    }
}
