#![forbid(unsafe_code)]

//! Walks the site core from the command line: prints the navigation in the
//! chosen language, submits a contact form and shows the toast queue.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use qline::prelude::*;
use qline::toast::ToastState;

#[derive(Debug, Parser)]
#[command(
    name = "qline-demo",
    about = "Exercise the qline translation store and toast queue",
    version
)]
struct Cli {
    /// Display language (en, fr, ar).
    #[arg(default_value = "en")]
    language: Language,

    /// Site configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Visitor name for the simulated contact submission.
    #[arg(long, default_value = "Ada")]
    name: String,

    /// Visitor email; leave empty to see the validation toast.
    #[arg(long, default_value = "ada@example.com")]
    email: String,

    /// Message body.
    #[arg(long, default_value = "Hello!")]
    message: String,
}

fn main() -> ExitCode {
    qline::logging::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("qline-demo: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> qline::Result<()> {
    let config = match &cli.config {
        Some(path) => SiteConfig::from_toml_file(path)?,
        None => SiteConfig::default(),
    };
    let site = Site::new(config)?;
    let t = site.translator();
    t.set_language(cli.language);

    let direction = if cli.language.is_rtl() { "rtl" } else { "ltr" };
    println!("{} [{direction}]", cli.language.native_name());
    for page in Page::NAV {
        if let Some(key) = page.nav_key() {
            println!("  {:<10} {}", page.path(), t.t(key));
        }
    }
    println!();
    println!("{}", Page::Home.title(t));
    println!("{}", t.t("hero.subtitle"));
    println!();

    let _subscription = site.toaster().subscribe(|state: &ToastState| {
        tracing::debug!(toasts = state.len(), "toast state published");
    });

    let mut form = ContactForm::new()
        .name(cli.name)
        .email(cli.email)
        .message(cli.message);
    match form.submit(t, site.toaster()) {
        Ok(handle) => println!("submitted (toast {})", handle.id()),
        Err(errors) => println!("rejected ({} problem(s))", errors.len()),
    }
    print_toasts(site.toaster());

    if let Some(toast) = site.toaster().use_state().toasts().first() {
        toast.set_open(false);
    }
    println!("after close:");
    print_toasts(site.toaster());

    let cancelled = site.teardown();
    println!("teardown cancelled {cancelled} removal timer(s)");
    Ok(())
}

fn print_toasts(toaster: &Toaster) {
    let view = toaster.use_state();
    if view.toasts().is_empty() {
        println!("  (no toasts)");
    }
    for toast in view.toasts() {
        let marker = match toast.variant() {
            ToastVariant::Default => "i",
            ToastVariant::Destructive => "!",
        };
        let state = if toast.is_open() { "open" } else { "closing" };
        println!(
            "  [{marker}] #{} {} ({state})",
            toast.id(),
            toast.title().unwrap_or_default()
        );
        if let Some(description) = toast.description() {
            for line in description.lines() {
                println!("        {line}");
            }
        }
    }
}
