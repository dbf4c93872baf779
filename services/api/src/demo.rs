use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use resfi::config::AppConfig;
use resfi::error::AppError;
use resfi::registry::WaitlistService;
use resfi::waitlist::{
    Goal, HttpWaitlistClient, NotificationLevel, NotificationQueue, SubmissionController,
    SubmissionStatus, SubmitError,
};

use crate::infra::InMemoryWaitlistRepository;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Email address to put on the waitlist
    #[arg(long)]
    pub(crate) email: String,
    /// First name of the visitor
    #[arg(long)]
    pub(crate) first_name: String,
    /// Last name of the visitor
    #[arg(long)]
    pub(crate) last_name: String,
    /// Goal to select; repeat for multiple (debt, loan, savings, automate)
    #[arg(long = "goal", value_parser = crate::infra::parse_goal)]
    pub(crate) goals: Vec<Goal>,
    /// Override the configured waitlist base URL
    #[arg(long)]
    pub(crate) base_url: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Post-success reset delay in milliseconds (shorten for quicker demos)
    #[arg(long, default_value_t = 3000)]
    pub(crate) reset_delay_ms: u64,
}

/// Drive one real submission through the HTTP client against the configured
/// waitlist service.
pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let base_url = args.base_url.unwrap_or(config.waitlist.base_url);

    let client = Arc::new(HttpWaitlistClient::new(base_url));
    let notifier = Arc::new(NotificationQueue::default());
    let controller = SubmissionController::new(client, notifier.clone());

    controller.set_email(args.email);
    controller.set_first_name(args.first_name);
    controller.set_last_name(args.last_name);
    for goal in args.goals {
        if !controller.selected_goals().contains(&goal) {
            controller.toggle_goal(goal);
        }
    }

    let status = controller.submit().await;
    print_toasts(&notifier);
    controller.teardown();

    match status {
        SubmissionStatus::Submitted => Ok(()),
        SubmissionStatus::Failed(message) => {
            Err(AppError::Waitlist(SubmitError::Rejected(message)))
        }
        _ => Err(AppError::Waitlist(SubmitError::Rejected(
            "submission was not accepted".to_string(),
        ))),
    }
}

/// Scripted end-to-end run against an in-memory waitlist: validation
/// rejection, success with the timed reset, then a duplicate rejection.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let reset_delay = Duration::from_millis(args.reset_delay_ms);
    let repository = Arc::new(InMemoryWaitlistRepository::default());
    let service = Arc::new(WaitlistService::new(repository));
    let notifier = Arc::new(NotificationQueue::default());
    let controller =
        SubmissionController::with_reset_delay(service.clone(), notifier.clone(), reset_delay);

    println!("ResFi waitlist demo\n");

    println!("1. Submitting an empty form:");
    let status = controller.submit().await;
    report(&status, &notifier);

    println!("2. Submitting a complete form:");
    controller.set_email("Ada@Resfi.AI");
    controller.set_first_name("Ada");
    controller.set_last_name("Lovelace");
    controller.toggle_goal(Goal::Savings);
    controller.toggle_goal(Goal::Automate);
    let status = controller.submit().await;
    report(&status, &notifier);

    tokio::time::sleep(reset_delay + Duration::from_millis(100)).await;
    println!(
        "   after the reset delay: status={}, email={:?}\n",
        controller.status().label(),
        controller.form().email
    );

    println!("3. Submitting the same email again:");
    controller.set_email("ada@resfi.ai");
    controller.set_first_name("Ada");
    controller.set_last_name("Lovelace");
    controller.toggle_goal(Goal::Savings);
    let status = controller.submit().await;
    report(&status, &notifier);

    println!("Waitlist now holds {} entries.", service.count().unwrap_or(0));
    controller.teardown();
    Ok(())
}

fn print_toasts(notifier: &NotificationQueue) {
    for toast in notifier.drain() {
        let level = match toast.level {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
        };
        println!("[{level}] {}", toast.message);
    }
}

fn report(status: &SubmissionStatus, notifier: &NotificationQueue) {
    for toast in notifier.drain() {
        let level = match toast.level {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
        };
        println!("   toast[{level}]: {}", toast.message);
    }
    println!("   status: {}\n", status.label());
}
