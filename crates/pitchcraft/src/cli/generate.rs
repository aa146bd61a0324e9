//! `pitchcraft generate` handler.

use crate::cli::{GenerateArgs, OutputFormat};
use pitchcraft::{
    EnvKeySelector, GeminiClient, JsonError, OperationStatus, PitchSession, PitchcraftResult,
    SessionSnapshot, StorageError, StorageErrorKind,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Video deadline used when neither the flag nor the configuration sets one.
const DEFAULT_MAX_WAIT_SECS: u64 = 600;

/// Generate a narrative and the requested assets, then print the result.
///
/// Returns `Ok(false)` when the narrative succeeded but a derived asset
/// failed; the failure messages are part of the printed output.
///
/// # Errors
///
/// Returns an error if the client cannot be configured, the narrative
/// fails, or an output file cannot be written.
#[instrument(skip_all, fields(image = args.image, video = args.video, social = args.social))]
pub async fn run_generate(args: GenerateArgs) -> PitchcraftResult<bool> {
    let client = GeminiClient::from_env()?;

    let mut policy = client.config().poll_policy();
    if let Some(secs) = args.max_wait {
        policy = policy.with_max_wait(Duration::from_secs(secs));
    } else if policy.max_wait().is_none() {
        policy = policy.with_max_wait(Duration::from_secs(DEFAULT_MAX_WAIT_SECS));
    }
    let (policy, cancel) = policy.cancellable();

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling video polling");
            cancel.cancel();
        }
    });

    let session = PitchSession::new(Arc::new(client), Arc::new(EnvKeySelector)).with_poll_policy(policy);
    session.set_description(args.description.as_str());

    let outcome = generate_all(&session, &args).await;
    interrupt.abort();
    if let Err(err) = outcome {
        if let Some(message) = session.snapshot().narrative_status.error {
            eprintln!("{}", message);
        }
        return Err(err);
    }

    if let (Some(path), Some(image)) = (&args.image_out, session.image()) {
        write_file(path, &image.decode()?).await?;
        info!(path = %path.display(), "Collage written");
    }

    if let Some(path) = &args.video_out {
        if let Some(bytes) = session.video_bytes().await? {
            write_file(path, &bytes).await?;
            info!(path = %path.display(), "Video written");
        }
    }

    let snapshot = session.snapshot();
    match args.format {
        OutputFormat::Human => print_human(&snapshot, &args),
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&snapshot)
                .map_err(|e| JsonError::new("session", e.to_string()))?;
            println!("{}", rendered);
        }
    }

    Ok([
        &snapshot.image_status,
        &snapshot.video_status,
        &snapshot.social_posts_status,
    ]
    .iter()
    .all(|status| status.error.is_none()))
}

/// Run the narrative, then image and video side by side, then social posts.
///
/// Only a narrative failure is returned; derived failures stay in the
/// session for reporting.
async fn generate_all(session: &PitchSession, args: &GenerateArgs) -> PitchcraftResult<()> {
    session.generate_narrative().await?;

    let want_image = args.image || args.social || args.image_out.is_some();
    let want_video = args.video || args.video_out.is_some();

    let image = async {
        if want_image {
            session.generate_image().await.is_ok()
        } else {
            false
        }
    };
    let video = async {
        if want_video {
            // Failure is recorded in the video status
            let _ = session.generate_video().await;
        }
    };
    let (image_ok, ()) = tokio::join!(image, video);

    if args.social && image_ok {
        // Failure is recorded in the social posts status
        let _ = session.generate_social_posts().await;
    }
    Ok(())
}

async fn write_file(path: &Path, bytes: &[u8]) -> PitchcraftResult<()> {
    tokio::fs::write(path, bytes).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
    })?;
    Ok(())
}

fn print_human(snapshot: &SessionSnapshot, args: &GenerateArgs) {
    if let Some(narrative) = &snapshot.narrative {
        println!("Your Marketing Narrative\n");
        for (field, text) in narrative.fields() {
            println!("{}", field.title());
            println!("  {}", text);
            println!("  Why this works: {}\n", field.explanation());
        }
    }

    report("Collage", &snapshot.image_status, || match &args.image_out {
        Some(path) => Some(format!("written to {}", path.display())),
        None => snapshot
            .image_url
            .as_ref()
            .map(|url| format!("generated ({} characters as a data URL)", url.len())),
    });

    report("Video", &snapshot.video_status, || match &args.video_out {
        Some(path) => Some(format!("written to {}", path.display())),
        None => snapshot.video_url.as_ref().map(|url| format!("available at {}", url)),
    });

    if let Some(posts) = &snapshot.social_posts {
        println!("Social Media Posts\n");
        for (platform, text) in posts.posts() {
            println!("== {} ==", platform.display_name());
            println!("{}\n", text);
        }
    }
    if let Some(error) = &snapshot.social_posts_status.error {
        eprintln!("Social posts: {}", error);
    }
}

fn report(label: &str, status: &OperationStatus, success: impl FnOnce() -> Option<String>) {
    if let Some(error) = &status.error {
        eprintln!("{}: {}", label, error);
    } else if let Some(line) = success() {
        println!("{}: {}", label, line);
    }
}
