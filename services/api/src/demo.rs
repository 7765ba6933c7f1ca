use crate::infra::{in_memory_service, InMemoryRecruitmentService};
use clap::Args;
use recruit_flow::error::AppError;
use recruit_flow::workflows::recruitment::{
    Application, ApplicationStatus, ApplicationWithCandidate, Job, NewCandidate, NewJob,
    RecruitmentError,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Minimum years of experience required by the demo job
    #[arg(long, default_value_t = 2.0)]
    pub(crate) min_experience: f64,
    /// Minimum language score (0-100) required by the demo job
    #[arg(long, default_value_t = 60.0)]
    pub(crate) min_language_score: f64,
    /// Stop after ranking; do not shortlist the top application
    #[arg(long)]
    pub(crate) skip_shortlist: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            min_experience: 2.0,
            min_language_score: 60.0,
            skip_shortlist: false,
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = in_memory_service();
    let transcript = walkthrough(&service, &args)?;
    for line in transcript {
        println!("{line}");
    }
    Ok(())
}

fn demo_candidates() -> Vec<NewCandidate> {
    [
        ("Asha Verma", "welding", 3.0, 70.0, true),
        ("Bilal Khan", "welding", 1.0, 70.0, true),
        ("Chen Wei", "pipe fitting", 6.0, 88.0, true),
        ("Dina Rahman", "welding", 5.0, 92.0, false),
    ]
    .into_iter()
    .map(
        |(name, skill, experience, language_score, documents_verified)| NewCandidate {
            name: name.to_string(),
            skill: skill.to_string(),
            experience,
            language_score,
            documents_verified,
        },
    )
    .collect()
}

fn walkthrough(
    service: &InMemoryRecruitmentService,
    args: &DemoArgs,
) -> Result<Vec<String>, RecruitmentError> {
    let mut lines = Vec::new();

    let job = service.create_job(NewJob {
        title: "Structural welder".to_string(),
        country: "Germany".to_string(),
        min_experience: args.min_experience,
        min_language_score: args.min_language_score,
    })?;
    lines.push(describe_job(&job));

    lines.push(String::new());
    lines.push("Applications".to_string());
    let mut created = Vec::new();
    for candidate in demo_candidates() {
        let candidate = service.create_candidate(candidate)?;
        let application =
            service.create_application(&candidate.id.to_string(), &job.id.to_string())?;
        lines.push(format!(
            "- {} -> {} (score {:.1})",
            candidate.name, application.status, application.eligibility_score
        ));
        created.push(application);
    }

    let ranked = service.list_applications_by_job(&job.id.to_string())?;
    lines.push(String::new());
    lines.push("Ranked listing".to_string());
    lines.extend(describe_ranking(&ranked));

    if args.skip_shortlist {
        return Ok(lines);
    }

    lines.push(String::new());
    match ranked.first() {
        Some(top) => {
            let shortlisted = service.shortlist_application(&top.application.id.to_string())?;
            lines.push(describe_shortlist(&top.candidate.name, &shortlisted));
        }
        None => lines.push("Shortlist: no applications".to_string()),
    }

    if let Some(rejected) = created
        .iter()
        .find(|application| application.status == ApplicationStatus::Rejected)
    {
        if let Err(err) = service.shortlist_application(&rejected.id.to_string()) {
            lines.push(format!("Shortlisting a {} application: {err}", rejected.status));
        }
    }

    Ok(lines)
}

fn describe_job(job: &Job) -> String {
    format!(
        "Job '{}' in {} (min experience {}, min language score {}) created {}",
        job.title,
        job.country,
        job.min_experience,
        job.min_language_score,
        job.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn describe_ranking(rows: &[ApplicationWithCandidate]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            format!(
                "{}. {} | {} | score {:.1} | {} yrs",
                index + 1,
                row.candidate.name,
                row.application.status,
                row.application.eligibility_score,
                row.candidate.experience
            )
        })
        .collect()
}

fn describe_shortlist(name: &str, application: &Application) -> String {
    format!("Shortlisted {} -> {}", name, application.status)
}
