use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;
use tempfile::tempdir;

fn run_report(input: &Path, month: &str, output_dir: &Path, extra: &[&str]) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_transaction-report");

    let output = Command::new(binary_path)
        .arg("--month").arg(month)
        .arg("--input").arg(input)
        .arg("--output").arg(output_dir)
        .args(extra)
        .env_remove("EMAIL_TO")
        .env_remove("REPORT_OUTPUT_DIR")
        .env_remove("REPORT_OUTBOX_DIR")
        .output()?;

    Ok(output)
}

#[test]
fn test_cli_generates_reports_for_sample() -> Result<()> {
    let output_dir = tempdir()?;
    let sample_path = Path::new("samples").join("august.csv");

    let output = run_report(&sample_path, "2023-08", output_dir.path(), &[])?;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("REPORT GENERATED SUCCESSFULLY"));
    assert!(stdout.contains("Transactions: 5"));
    assert!(stdout.contains("Total amount: R$ 1,478.98"));
    assert!(stdout.contains("Chargebacks: 1"));
    assert!(stdout.contains("  - Removed 1 rows with invalid dates"));
    assert!(stdout.contains("  - Removed 1 duplicate transactions"));
    assert!(stdout.contains("  - Found 1 chargeback(s)"));

    let xml = fs::read_to_string(output_dir.path().join("202308").join("report.xml"))?;

    assert_eq!(xml.matches("<Transaction id=").count(), 5);
    assert_eq!(xml.matches("<Transaction id=\"TX1001\">").count(), 1);
    assert!(xml.contains("<Amount currency=\"BRL\">150.75</Amount>"));
    assert!(xml.contains("<MerchantId>12345678000100</MerchantId>"));
    assert!(xml.contains("<MerchantId>1234567890100</MerchantId>"));
    assert!(xml.contains("<Date>2023-08-02</Date>"));
    assert!(xml.contains("<Category>SERVICES</Category>"));
    assert!(!xml.contains("TX1005"));

    let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(output_dir.path().join("202308").join("summary.json"))?)?;

    assert_eq!(summary["month"], "2023-08");
    assert_eq!(summary["total_transactions"], 5);
    assert_eq!(summary["by_status"]["chargeback"], 1);
    assert_eq!(summary["by_network"]["1"], 2);

    Ok(())
}

#[test]
fn test_cli_output_is_deterministic_apart_from_timestamps() -> Result<()> {
    let first = tempdir()?;
    let second = tempdir()?;
    let sample_path = Path::new("samples").join("august.csv");

    run_report(&sample_path, "2023-08", first.path(), &[])?;
    run_report(&sample_path, "2023-08", second.path(), &[])?;

    let strip = |path: &Path| -> Result<String> {
        Ok(fs::read_to_string(path)?
            .lines()
            .filter(|line| !line.contains("generated_at"))
            .collect::<Vec<_>>()
            .join("\n"))
    };

    assert_eq!(
        strip(&first.path().join("202308").join("summary.json"))?,
        strip(&second.path().join("202308").join("summary.json"))?
    );

    let transactions = |path: &Path| -> Result<Vec<String>> {
        Ok(fs::read_to_string(path)?
            .lines()
            .filter(|line| line.contains("<Transaction id="))
            .map(str::to_string)
            .collect())
    };

    assert_eq!(
        transactions(&first.path().join("202308").join("report.xml"))?,
        transactions(&second.path().join("202308").join("report.xml"))?
    );

    Ok(())
}

#[test]
fn test_cli_fails_when_month_has_no_transactions() -> Result<()> {
    let output_dir = tempdir()?;
    let sample_path = Path::new("samples").join("august.csv");

    let output = run_report(&sample_path, "2024-01", output_dir.path(), &[])?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("No transactions found for 2024-01"));
    assert!(!output_dir.path().join("202401").exists());

    Ok(())
}

#[test]
fn test_cli_rejects_malformed_month() -> Result<()> {
    let output_dir = tempdir()?;
    let sample_path = Path::new("samples").join("august.csv");

    let output = run_report(&sample_path, "2023-8", output_dir.path(), &[])?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("expected YYYY-MM"));

    Ok(())
}

#[test]
fn test_cli_rejects_missing_input_file() -> Result<()> {
    let output_dir = tempdir()?;

    let output = run_report(Path::new("samples/missing.csv"), "2023-08", output_dir.path(), &[])?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Input file not found"));

    Ok(())
}

#[test]
fn test_cli_aborts_on_thousands_separated_amount() -> Result<()> {
    let output_dir = tempdir()?;
    let sample_path = Path::new("samples").join("thousands.csv");

    let output = run_report(&sample_path, "2023-08", output_dir.path(), &[])?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Invalid amount"));
    assert!(!output_dir.path().join("202308").exists());

    Ok(())
}

#[test]
fn test_cli_reports_missing_columns() -> Result<()> {
    let output_dir = tempdir()?;
    let sample_path = Path::new("samples").join("missing_columns.csv");

    let output = run_report(&sample_path, "2023-08", output_dir.path(), &[])?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Missing required columns: amount_BRL, merchant_id"));

    Ok(())
}

#[test]
fn test_cli_writes_notification_to_outbox() -> Result<()> {
    let output_dir = tempdir()?;
    let outbox = output_dir.path().join("outbox");
    let sample_path = Path::new("samples").join("august.csv");
    let outbox_arg = outbox.to_string_lossy().to_string();

    let output = run_report(
        &sample_path,
        "2023-08",
        output_dir.path(),
        &["--send-email", "--email-to", "ops@example.com", "--outbox", &outbox_arg]
    )?;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8(output.stdout)?.contains("Email sent successfully"));

    let messages: Vec<_> = fs::read_dir(&outbox)?.collect::<Result<_, _>>()?;

    assert_eq!(messages.len(), 1);

    let message = fs::read_to_string(messages[0].path())?;

    assert!(message.contains("To: ops@example.com"));
    assert!(message.contains("  - Total amount: R$ 1,478.98"));
    assert!(message.contains("  ! Found 1 chargeback(s)"));

    Ok(())
}

#[test]
fn test_cli_fails_email_without_recipient() -> Result<()> {
    let output_dir = tempdir()?;
    let outbox = output_dir.path().join("outbox");
    let sample_path = Path::new("samples").join("august.csv");
    let outbox_arg = outbox.to_string_lossy().to_string();

    let output = run_report(&sample_path, "2023-08", output_dir.path(), &["--send-email", "--outbox", &outbox_arg])?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("No email recipient configured"));
    assert!(!outbox.exists());

    Ok(())
}
