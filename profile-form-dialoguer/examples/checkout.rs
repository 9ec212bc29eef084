//! Fill in the checkout delivery step in the terminal.
//!
//! Run with `cargo run -p profile-form-dialoguer --example checkout`.
//! Set `RUST_LOG=profile_form=debug` to watch sections being rebuilt.

use profile_form::{FormConfig, FormEngine, RequestContext, StaticFieldSource, init_tracing};
use profile_form_dialoguer::DialoguerBackend;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let source = StaticFieldSource::new()
        .with_location("checkout", example_forms::checkout_profile()?)
        .with_location("profile", example_forms::edit_profile()?);

    let returning = std::env::args().any(|arg| arg == "--edit");
    let (context, config) = if returning {
        (
            RequestContext::new("demo").with_auth_token("demo-session").for_location("profile", "update"),
            FormConfig::default().with_edit_mode(true),
        )
    } else {
        (
            RequestContext::new("demo").for_location("checkout", "update"),
            FormConfig::checkout(),
        )
    };

    let mut engine = FormEngine::load(&source, &context, config)?;
    let values = engine.run(DialoguerBackend::new())?;

    println!();
    println!("{}", serde_json::to_string_pretty(&values.to_json())?);

    Ok(())
}
