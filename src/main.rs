// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! Anketa CLI entrypoint.
//!
//! Runs a scripted edit session against the in-memory backend and prints the
//! rendered page before and after, so the whole edit/save lifecycle can be
//! inspected from a terminal.

use std::error::Error;
use std::sync::Arc;

use anketa::client::memory::MemoryClient;
use anketa::model::{fixtures, SocialLink, SocialPlatform, UserId};
use anketa::page::ProfilePage;
use anketa::render::render_page;
use anketa::save::AckMode;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--user <id>] [--viewer <id>] [--late-ack] [--fail-saves]\n\nRuns a demo edit session against an in-memory profile backend.\n\n--user selects the profile owner (default: olena).\n--viewer renders the page as another user instead of the owner.\n--late-ack holds the page-level saving indicator until every save has\nactually persisted, instead of clearing it on dispatch.\n--fail-saves makes the backend reject every save, to exercise retry."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    user: Option<String>,
    viewer: Option<String>,
    late_ack: bool,
    fail_saves: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--user" => {
                if options.user.is_some() {
                    return Err(());
                }
                options.user = Some(args.next().ok_or(())?);
            }
            "--viewer" => {
                if options.viewer.is_some() {
                    return Err(());
                }
                options.viewer = Some(args.next().ok_or(())?);
            }
            "--late-ack" => {
                if options.late_ack {
                    return Err(());
                }
                options.late_ack = true;
            }
            "--fail-saves" => {
                if options.fail_saves {
                    return Err(());
                }
                options.fail_saves = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn print_page(page: &ProfilePage) {
    for line in render_page(page) {
        println!("{line}");
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "anketa".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();

        let user = UserId::new(options.user.as_deref().unwrap_or("olena"))?;
        let viewer = match options.viewer.as_deref() {
            Some(viewer) => UserId::new(viewer)?,
            None => user.clone(),
        };
        let ack_mode = if options.late_ack { AckMode::AfterPersist } else { AckMode::Immediate };

        let client = MemoryClient::new(fixtures::demo_snapshot(), fixtures::demo_account());
        if options.fail_saves {
            client.set_fail_persists(true);
        }

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let mut page = ProfilePage::new(Arc::new(client), user, Some(&viewer), ack_mode);
            page.load().await;

            println!("--- initial ---");
            print_page(&page);

            if !page.viewer_is_owner() {
                return Ok(());
            }

            page.begin_edit();
            page.edit_text(anketa::model::FieldId::Bio, "Frontend tutor, now shipping Rust.")?;
            page.edit_text(anketa::model::FieldId::Gender, "f")?;
            page.edit_link(SocialLink::new(
                SocialPlatform::Facebook,
                Some("https://fb.com/olena.k".to_owned()),
            ))?;

            println!();
            println!("--- editing ---");
            print_page(&page);

            page.save_all();
            page.drain_saves().await;

            println!();
            println!("--- saved ---");
            print_page(&page);

            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("anketa: {err}");
        std::process::exit(1);
    }
}
