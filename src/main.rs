use std::io;
use std::rc::Rc;

use zdoc::app::Session;
use zdoc::kernel::services::adapters::{load_settings, StorageService};
use zdoc::kernel::DocumentRegistry;
use zdoc::models::Resource;

mod logging;

fn main() -> io::Result<()> {
    let (settings, settings_error) = load_settings();
    let logging = logging::init(&settings.log_filter);
    if let Some(e) = settings_error {
        tracing::warn!(error = %e, "failed to load settings, using defaults");
    }

    let Some(arg) = std::env::args().nth(1) else {
        eprintln!("usage: zdoc <path>");
        std::process::exit(2);
    };
    let resource = Resource::parse(&arg)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    if let Some(guard) = &logging {
        tracing::info!(
            resource = %resource,
            log_dir = %guard.log_dir().display(),
            "starting session"
        );
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let registry = DocumentRegistry::new(Rc::new(StorageService::new()))
            .with_undo_policy(settings.undo_mismatch);
        let session = Session::open(&registry, &resource, &settings);
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        session.run(stdin, tokio::io::stdout()).await
    })
}
