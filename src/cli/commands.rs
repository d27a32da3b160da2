//! CLI commands implementation.

use console::style;

use crate::config::Settings;
use crate::llm::LlmClient;
use crate::ocr::TextExtractor;
use crate::pdf;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    println!(
        "{} Initialized ewyp in {}",
        style("✓").green(),
        settings.data_dir.display()
    );
    if settings.template_if_present().is_none() {
        println!(
            "{} Form template missing; place it at {}",
            style("!").yellow(),
            settings.template_path.display()
        );
    }
    Ok(())
}

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind)?;

    println!("{} Preparing database...", style("→").cyan());
    settings.ensure_directories()?;
    let ctx = settings.create_db_context();
    match ctx.init_schema().await {
        Ok(()) => println!("  {} Database ready", style("✓").green()),
        Err(e) => {
            eprintln!("  {} Schema setup failed: {}", style("✗").red(), e);
            return Err(anyhow::anyhow!("Database schema setup failed: {}", e));
        }
    }

    println!(
        "{} Starting ewyp server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Show record counts and tool availability.
pub async fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    let count = ctx.documents().count_all().await?;
    println!("Documents: {}", count);

    match settings.template_if_present() {
        Some(path) => println!("Template:  {} {}", style("✓").green(), path.display()),
        None => println!(
            "Template:  {} missing ({})",
            style("✗").red(),
            settings.template_path.display()
        ),
    }

    let extractor = TextExtractor::new().with_language(&settings.ocr_language);
    match extractor.ensure_available() {
        Ok(()) => println!("OCR:       {} tesseract ({})", style("✓").green(), settings.ocr_language),
        Err(e) => println!("OCR:       {} {}", style("✗").red(), e),
    }

    let llm = LlmClient::new(settings.llm.clone());
    if llm.is_available().await {
        println!("LLM:       {} {}", style("✓").green(), llm.config().model);
    } else {
        println!("LLM:       {} unavailable", style("✗").red());
    }

    Ok(())
}

/// Dump the form template's AcroForm fields.
pub fn cmd_fields(settings: &Settings) -> anyhow::Result<()> {
    let template = pdf::load_template(&settings.template_path)?;
    let fields = pdf::read_form_fields(&template)?;

    println!("{} fields in {}", fields.len(), settings.template_path.display());
    for (name, value) in fields {
        if value.is_empty() {
            println!("  {}", name);
        } else {
            println!("  {} = {}", name, value);
        }
    }
    Ok(())
}

/// Parse a bind address that can be:
/// - Just a port: "8000" -> 127.0.0.1:8000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:8000
/// - Host and port: "0.0.0.0:8000" -> 0.0.0.0:8000
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    Ok((bind.to_string(), 8000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(
            parse_bind_address("9000").unwrap(),
            ("127.0.0.1".to_string(), 9000)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0:9000").unwrap(),
            ("0.0.0.0".to_string(), 9000)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0").unwrap(),
            ("0.0.0.0".to_string(), 8000)
        );
    }
}
