use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_eligibility::config::AppConfig;
use loan_eligibility::error::AppError;
use loan_eligibility::lending::{ApplicantProfile, EligibilityEvaluator, EligibilityVerdict};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "Loan Eligibility API",
    about = "Run the loan eligibility service or evaluate a profile from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single applicant profile read from a JSON file
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a JSON applicant profile (camelCase fields, `loanTenure` in months)
    #[arg(long)]
    pub(crate) profile: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let evaluator = EligibilityEvaluator::new(config.policy);
    let verdict = evaluate_profile_file(&evaluator, &args.profile)?;
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}

pub(crate) fn evaluate_profile_file(
    evaluator: &EligibilityEvaluator,
    path: &Path,
) -> Result<EligibilityVerdict, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let profile: ApplicantProfile = serde_json::from_str(&raw)?;
    Ok(evaluator.evaluate(&profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_eligibility::lending::EligibilityPolicy;
    use std::io::Write;

    fn write_profile(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "loan-eligibility-{}-{name}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).expect("create profile file");
        file.write_all(contents.as_bytes())
            .expect("write profile file");
        path
    }

    #[test]
    fn evaluate_profile_file_prices_eligible_applicant() {
        let path = write_profile(
            "eligible",
            r#"{
                "name": "Asha Rao",
                "age": 35,
                "annualIncome": 600000,
                "creditScore": 720,
                "monthlyDebtPayments": 5000,
                "requestedAmount": 5000000,
                "loanTenure": 60,
                "employmentType": "SALARIED"
            }"#,
        );
        let evaluator = EligibilityEvaluator::new(EligibilityPolicy::default());

        let verdict = evaluate_profile_file(&evaluator, &path).expect("verdict");
        std::fs::remove_file(&path).ok();

        assert!(verdict.eligible);
        assert_eq!(verdict.max_loan_amount, 2_160_000.0);
        assert_eq!(verdict.approved_amount, 2_160_000.0);
        assert_eq!(verdict.interest_rate, 8.0);
    }

    #[test]
    fn evaluate_profile_file_reports_malformed_json() {
        let path = write_profile("malformed", "{ \"age\": ");
        let evaluator = EligibilityEvaluator::new(EligibilityPolicy::default());

        let result = evaluate_profile_file(&evaluator, &path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AppError::Payload(_))));
    }

    #[test]
    fn evaluate_profile_file_reports_missing_file() {
        let evaluator = EligibilityEvaluator::new(EligibilityPolicy::default());
        let path = std::env::temp_dir().join("loan-eligibility-does-not-exist.json");

        let result = evaluate_profile_file(&evaluator, &path);

        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
