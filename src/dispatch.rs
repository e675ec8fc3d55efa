use std::io::Write;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::config::HttpAccessConfig;
use crate::executor::{execute_request, print_execution_summary, ExecutionResult};
use crate::flatten::{decode_records, flatten_records, FieldSpec, Table};
use crate::output::HostWriter;
use crate::params::{parse_params, Mode, RequestDescriptor};
use crate::preview::{capture_request, PromptUi};

pub struct Invocation {
    pub mode: Mode,
    pub params: Option<String>,
    pub config: HttpAccessConfig,
}

pub struct FetchedTable {
    pub execution: ExecutionResult,
    pub table: Table,
}

/// Runs one host invocation, writing the protocol blocks to `out`.
///
/// Blocks are only written once the response has been fetched and
/// flattened, so a failure leaves `out` empty.
pub async fn run(invocation: &Invocation, ui: &mut dyn PromptUi, out: impl Write) -> Result<()> {
    let mut host = HostWriter::new(out);
    let config = &invocation.config;

    match invocation.mode {
        mode @ (Mode::Refresh | Mode::Edit) => {
            let raw = invocation
                .params
                .as_deref()
                .ok_or_else(|| anyhow!("-params is required in {mode} mode"))?;

            if config.debug_params {
                return host.write_params_block(raw, mode);
            }

            let descriptor = parse_params(raw).context("reading -params")?;
            let fetched = fetch_table(&descriptor, &config.fields).await?;
            host.write_data_block(&fetched.table, None)?;
        }
        Mode::Preview => {
            let descriptor = capture_request(ui, &config.defaults)?;

            if config.debug_params {
                host.write_ds_info(&descriptor)?;
                return host.write_params_block(
                    invocation.params.as_deref().unwrap_or_default(),
                    Mode::Preview,
                );
            }

            let fetched = fetch_table(&descriptor, &config.fields).await?;
            host.write_ds_info(&descriptor)?;
            let shown = host.write_data_block(&fetched.table, Some(config.preview_max_rows))?;

            if let Err(err) =
                print_execution_summary(&fetched.execution, shown, &mut std::io::stderr())
            {
                debug!(error = %err, "could not write request summary");
            }
        }
    }

    Ok(())
}

pub async fn fetch_table(descriptor: &RequestDescriptor, fields: &[FieldSpec]) -> Result<FetchedTable> {
    let definition = descriptor
        .to_definition()
        .context("decoding request parameters")?;
    let execution = execute_request(&definition).await?;
    let records = decode_records(&execution.response.body)?;
    let table = flatten_records(&records, fields);
    info!(
        rows = table.len(),
        columns = table.header.len(),
        "flattened response"
    );

    Ok(FetchedTable { execution, table })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RequestDefaults;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;

    const USERS: &str = r#"[
      {"id": 1, "username": "Bret", "company": {"name": "Romaguera-Crona"}},
      {"id": 2, "username": "Antonette", "company": {"name": "Deckow-Crist"}},
      {"id": 3, "username": "Samantha", "company": {"name": "Romaguera-Jacobson"}}
    ]"#;

    /// Accepts every default and picks the first listed method.
    struct DefaultsUi;

    impl PromptUi for DefaultsUi {
        fn print(&mut self, _message: &str) {}

        fn select(&mut self, _prompt: &str, _items: &[String], start: usize) -> Result<Option<usize>> {
            Ok(Some(start))
        }

        fn input(&mut self, _prompt: &str, default: Option<&str>) -> Result<Option<String>> {
            Ok(default.map(str::to_string))
        }

        fn secret(&mut self, _prompt: &str) -> Result<Option<String>> {
            Ok(Some(String::new()))
        }
    }

    async fn users_server() -> MockServer {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(USERS);
            })
            .await;
        server
    }

    async fn run_to_string(invocation: &Invocation) -> Result<String> {
        let mut out = Vec::new();
        run(invocation, &mut DefaultsUi, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn refresh_emits_every_row() -> Result<()> {
        let server = users_server().await;
        let invocation = Invocation {
            mode: Mode::Refresh,
            params: Some(format!("uri={};type=GET", server.url("/users"))),
            config: HttpAccessConfig::default(),
        };

        let output = run_to_string(&invocation).await?;
        assert_eq!(
            output,
            "beginData\n\
             id,username,company_name\n\
             1,Bret,Romaguera-Crona\n\
             2,Antonette,Deckow-Crist\n\
             3,Samantha,Romaguera-Jacobson\n\
             endData\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn edit_applies_field_selection() -> Result<()> {
        let server = users_server().await;
        let invocation = Invocation {
            mode: Mode::Edit,
            params: Some(format!("uri={}", server.url("/users"))),
            config: HttpAccessConfig {
                fields: vec![
                    FieldSpec::new("company.name").with_column("company"),
                    FieldSpec::new("username"),
                ],
                ..HttpAccessConfig::default()
            },
        };

        let output = run_to_string(&invocation).await?;
        assert!(output.starts_with("beginData\ncompany,username\nRomaguera-Crona,Bret\n"));
        assert!(output.ends_with("endData\n"));
        Ok(())
    }

    #[tokio::test]
    async fn refresh_requires_params() {
        let invocation = Invocation {
            mode: Mode::Refresh,
            params: None,
            config: HttpAccessConfig::default(),
        };
        let err = run_to_string(&invocation).await.unwrap_err();
        assert!(err.to_string().contains("-params is required in refresh mode"));
    }

    #[tokio::test]
    async fn refresh_writes_nothing_on_malformed_json() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/broken");
                then.status(200).body("{\"unterminated\": ");
            })
            .await;

        let invocation = Invocation {
            mode: Mode::Refresh,
            params: Some(format!("uri={}", server.url("/broken"))),
            config: HttpAccessConfig::default(),
        };

        let mut out = Vec::new();
        let err = run(&invocation, &mut DefaultsUi, &mut out).await.unwrap_err();
        assert!(format!("{err:#}").contains("decoding JSON response body"));
        assert!(out.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn refresh_of_empty_objects_writes_only_markers() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/empty");
                then.status(200).body("[{}, {}]");
            })
            .await;

        let invocation = Invocation {
            mode: Mode::Refresh,
            params: Some(format!("uri={}", server.url("/empty"))),
            config: HttpAccessConfig::default(),
        };

        assert_eq!(run_to_string(&invocation).await?, "beginData\nendData\n");
        Ok(())
    }

    #[tokio::test]
    async fn debug_params_skips_request() -> Result<()> {
        let invocation = Invocation {
            mode: Mode::Edit,
            params: Some("uri=http://127.0.0.1:9/unused".to_string()),
            config: HttpAccessConfig {
                debug_params: true,
                ..HttpAccessConfig::default()
            },
        };

        let output = run_to_string(&invocation).await?;
        assert_eq!(
            output,
            "beginData\nparams,mode\nuri=http://127.0.0.1:9/unused,2\nendData\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn preview_emits_ds_info_and_capped_rows() -> Result<()> {
        let server = users_server().await;
        let invocation = Invocation {
            mode: Mode::Preview,
            params: None,
            config: HttpAccessConfig {
                defaults: RequestDefaults {
                    uri: server.url("/users"),
                    header: "Accept:application/json".to_string(),
                    ..RequestDefaults::default()
                },
                preview_max_rows: 2,
                ..HttpAccessConfig::default()
            },
        };

        let output = run_to_string(&invocation).await?;
        let expected = format!(
            "beginDSInfo\n\
             URI;{};true;\n\
             TYPE;GET;true;\n\
             HEADER;Accept:application/json;true;\n\
             USERNAME;;true\n\
             PASSWORD;;true\n\
             BODY;;true\n\
             csv_first_row_has_column_names;true;true\n\
             endDSInfo\n\
             beginData\n\
             id,username,company_name\n\
             1,Bret,Romaguera-Crona\n\
             2,Antonette,Deckow-Crist\n\
             endData\n",
            server.url("/users")
        );
        assert_eq!(output, expected);
        Ok(())
    }
}
