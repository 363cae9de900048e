// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::{ConfigManager, ServiceClient};
use crate::display;
use crate::eligibility::evaluate;
use crate::intake::ApplicationForm;
use crate::results::{export_csv, search_by_name, summarize, latest_analysis, ResultQuery, SortKey};
use crate::types::{Applicant, Criteria, CriteriaForm, CriteriaSubmission, FitVerdict, MarksType};
use crate::utils::export_file_path;

#[derive(Parser)]
#[command(name = "checksys")]
#[command(about = "Applicant intake and recruiter console for the resume screening service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML configuration file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit an application with a resume
    Apply(ApplyArgs),
    /// Recruiter console
    #[command(subcommand)]
    Recruiter(RecruiterCommand),
}

#[derive(Args)]
pub struct ApplyArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    /// 10-digit phone number
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub degree: String,
    #[arg(long, default_value = "")]
    pub specialization: String,
    #[arg(long, default_value = "")]
    pub passing_year: String,
    #[arg(long, value_enum, default_value_t = MarksType::Cgpa)]
    pub marks_type: MarksType,
    /// Degree CGPA or percentage, per --marks-type
    #[arg(long, default_value = "")]
    pub marks_value: String,
    /// CGPA scale: 10, 4 or 5
    #[arg(long, default_value = "10")]
    pub cgpa_out_of: String,
    #[arg(long, default_value = "")]
    pub tenth_marks: String,
    #[arg(long, default_value = "")]
    pub twelfth_marks: String,
    /// Resume file (PDF or DOCX)
    #[arg(long)]
    pub resume: Option<PathBuf>,
}

impl From<ApplyArgs> for ApplicationForm {
    fn from(args: ApplyArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            degree: args.degree,
            specialization: args.specialization,
            passing_year: args.passing_year,
            marks_type: args.marks_type,
            marks_value: args.marks_value,
            cgpa_out_of: args.cgpa_out_of,
            tenth_marks: args.tenth_marks,
            twelfth_marks: args.twelfth_marks,
            resume: args.resume,
        }
    }
}

#[derive(Args, Clone)]
pub struct CriteriaArgs {
    #[arg(long, default_value = "2024")]
    pub max_passing_year: String,
    #[arg(long, default_value = "75")]
    pub min_tenth_marks: String,
    #[arg(long, default_value = "75")]
    pub min_twelfth_marks: String,
    /// CGPA (<= 10) or percentage
    #[arg(long, default_value = "8")]
    pub min_degree_marks: String,
}

impl From<CriteriaArgs> for CriteriaForm {
    fn from(args: CriteriaArgs) -> Self {
        Self {
            max_passing_year: args.max_passing_year,
            min_tenth_marks: args.min_tenth_marks,
            min_twelfth_marks: args.min_twelfth_marks,
            min_degree_marks: args.min_degree_marks,
        }
    }
}

#[derive(Subcommand)]
pub enum RecruiterCommand {
    /// Set screening criteria and upload the job description
    Criteria {
        #[command(flatten)]
        criteria: CriteriaArgs,
        /// Job description PDF
        #[arg(long)]
        job_description: Option<PathBuf>,
    },
    /// List submitted applications
    Applications {
        /// Filter by applicant name
        #[arg(long)]
        search: Option<String>,
        /// Show one card per applicant instead of a table
        #[arg(long)]
        cards: bool,
    },
    /// Delete one application
    DeleteApplication { id: i64 },
    /// Delete every application
    DeleteAllApplications {
        #[arg(long)]
        yes: bool,
    },
    /// Run the server-side parse and scoring pass
    Parse,
    /// Browse scored results
    Results {
        #[arg(long, value_enum, default_value_t = SortKey::Final)]
        sort: SortKey,
        /// Flip the sort order
        #[arg(long)]
        reverse: bool,
        #[arg(long, value_enum)]
        verdict: Option<FitVerdict>,
        /// Minimum final weighted score
        #[arg(long)]
        min_score: Option<f64>,
        #[arg(long)]
        search: Option<String>,
        /// Expand missing elements and feedback
        #[arg(long)]
        details: bool,
        /// Write the ranked rows to a CSV file (or a directory)
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Delete one analysis
    DeleteAnalysis { id: i64 },
    /// Delete every analysis
    DeleteAllAnalyses {
        #[arg(long)]
        yes: bool,
    },
    /// Check applications against criteria locally
    Screen {
        #[command(flatten)]
        criteria: CriteriaArgs,
        /// Read applicants from a JSON file instead of the backend
        #[arg(long)]
        from_file: Option<PathBuf>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ConfigManager::load(cli.config.as_deref())?;
    let client = ServiceClient::new(&config.service)?;

    match cli.command {
        Command::Apply(args) => apply(&client, args.into()).await,
        Command::Recruiter(command) => handle_recruiter_command(&client, command).await,
    }
}

async fn apply(client: &ServiceClient, form: ApplicationForm) -> Result<()> {
    let application = form.validate()?;
    let ack = client.apply(&application).await?;

    println!("✅ Submission Successful!");
    println!(
        "   {}",
        ack.message_or("Thank you for your application. We will reach out to you shortly if your profile is a good fit.")
    );
    Ok(())
}

pub async fn handle_recruiter_command(client: &ServiceClient, command: RecruiterCommand) -> Result<()> {
    match command {
        RecruiterCommand::Criteria {
            criteria,
            job_description,
        } => {
            let submission = CriteriaSubmission::new(criteria.into(), job_description.as_deref())?;
            let ack = client.set_criteria(&submission).await?;

            println!(
                "✅ {}",
                ack.message_or("Criteria and Job Description have been set successfully!")
            );
            println!(
                "   Max passing year: {}  Min 10th: {}%  Min 12th: {}%  Min degree: {}",
                submission.criteria.max_passing_year,
                submission.criteria.min_tenth_marks,
                submission.criteria.min_twelfth_marks,
                submission.criteria.min_degree_marks
            );
        }

        RecruiterCommand::Applications { search, cards } => {
            let applicants = client.list_applications().await?;
            let matching = search_by_name(&applicants, search.as_deref().unwrap_or(""));

            if matching.is_empty() {
                println!("No applicants found matching your search.");
            } else if cards {
                for applicant in &matching {
                    println!("{}\n", display::applicant_card(applicant));
                }
            } else {
                println!("{}", display::applications_table(&matching));
            }
            println!("\n{} of {} applications shown", matching.len(), applicants.len());
        }

        RecruiterCommand::DeleteApplication { id } => {
            let ack = client.delete_application(id).await?;
            println!("✅ {}", ack.message_or("Application deleted"));

            let remaining = client.list_applications().await?;
            println!("   {} applications remaining", remaining.len());
        }

        RecruiterCommand::DeleteAllApplications { yes } => {
            if !confirmed(yes, "delete every application") {
                return Ok(());
            }
            let ack = client.delete_all_applications().await?;
            println!("✅ {}", ack.message_or("All applications deleted"));
        }

        RecruiterCommand::Parse => {
            println!("Parsing and scoring resumes... This will take a moment.");
            let parsed = client.parse_all().await?;

            if parsed.results.is_empty() {
                println!("No applications were scored.");
            } else {
                println!("{}", display::parse_outcomes_table(&parsed.results));
            }
            if let Some(message) = &parsed.message {
                println!("\n{}", message);
            }
        }

        RecruiterCommand::Results {
            sort,
            reverse,
            verdict,
            min_score,
            search,
            details,
            export,
        } => {
            let analyzed = client.list_analyzed().await?;
            let query = ResultQuery {
                sort,
                reverse,
                verdict,
                min_score,
                search,
            };
            let rows = query.apply(&analyzed);

            println!("{}", display::verdict_summary(&summarize(&analyzed)));
            if rows.is_empty() {
                println!("No analyzed applicants match the current filters, or parsing has not been run yet.");
                return Ok(());
            }

            println!("{}", display::results_table(&rows));
            if details {
                for row in &rows {
                    println!("\n{}. {}", row.rank, row.applicant.label());
                    println!("{}", display::analysis_details(row.analysis));
                }
            }

            if let Some(target) = export {
                let path = if target.is_dir() {
                    export_file_path(&target)
                } else {
                    target
                };
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                export_csv(&rows, file)?;
                info!("Exported {} rows to {}", rows.len(), path.display());
                println!("\n📄 Exported {} rows to {}", rows.len(), path.display());
            }
        }

        RecruiterCommand::DeleteAnalysis { id } => {
            let ack = client.delete_analysis(id).await?;
            println!("✅ {}", ack.message_or("Analysis deleted"));

            let analyzed = client.list_analyzed().await?;
            let remaining = analyzed
                .iter()
                .filter(|entry| latest_analysis(entry).is_some())
                .count();
            println!("   {} applicants still have an analysis", remaining);
        }

        RecruiterCommand::DeleteAllAnalyses { yes } => {
            if !confirmed(yes, "delete every analysis") {
                return Ok(());
            }
            let ack = client.delete_all_analyses().await?;
            println!("✅ {}", ack.message_or("All analyses deleted"));
        }

        RecruiterCommand::Screen {
            criteria,
            from_file,
        } => {
            let form: CriteriaForm = criteria.into();
            let criteria = Criteria::parse(&form)?;
            let applicants: Vec<Applicant> = match from_file {
                Some(path) => crate::load_applicants_file(&path).await?,
                None => client.list_applications().await?,
            };

            let mut eligible = 0;
            for applicant in &applicants {
                let report = evaluate(applicant, &criteria);
                if report.is_eligible() {
                    eligible += 1;
                }
                println!("{}", display::eligibility_line(applicant, &report));
            }
            println!("\n{} of {} applicants meet the criteria", eligible, applicants.len());
        }
    }

    Ok(())
}

fn confirmed(yes: bool, action: &str) -> bool {
    if !yes {
        warn!("Refusing to {} without --yes", action);
        println!("⚠️  This will {}. Re-run with --yes to confirm.", action);
    }
    yes
}
