//! SignClass CLI - browse classrooms, exams, games, and the sign-language
//! library
//!
//! A terminal companion for the SignClass education platform. Every command
//! reads through a shared in-memory TTL cache so repeated commands in a
//! `watch` session avoid redundant backend fetches.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use signclass::cache::DataCache;
use signclass::cli::{search_query, Cli, Command};
use signclass::data::{
    BackendClient, Classroom, ClassroomClient, Exam, ExamClient, Game, LibraryClient, MediaItem,
    SignVideo, Student,
};
use signclass::refresh::{RefreshConfig, RefreshHandle, RefreshMessage};
use signclass::search::{SearchClient, SearchHit};

/// Installs the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug level for
/// this crate and info stays the default.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "signclass=debug"
    } else {
        "signclass=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_classrooms(classrooms: &[Classroom]) {
    if classrooms.is_empty() {
        println!("No classrooms found");
        return;
    }
    for c in classrooms {
        let archived = if c.archived { "  [archived]" } else { "" };
        println!(
            "{}  {} (grade {}, {} students){}",
            c.id, c.name, c.grade_level, c.student_count, archived
        );
    }
}

fn print_roster(students: &[Student]) {
    if students.is_empty() {
        println!("No students enrolled");
        return;
    }
    for s in students {
        println!("{}  {}", s.id, s.name);
    }
}

fn print_exams(exams: &[Exam]) {
    if exams.is_empty() {
        println!("No exams scheduled");
        return;
    }
    for e in exams {
        let state = if e.published { "published" } else { "draft" };
        println!(
            "{}  {}  {}  {}  {} min, {} questions  [{}]",
            e.id,
            e.title,
            e.subject.label(),
            e.scheduled_at.format("%Y-%m-%d %H:%M"),
            e.duration_minutes,
            e.question_count,
            state
        );
    }
}

fn print_games(games: &[Game]) {
    if games.is_empty() {
        println!("No games in the catalog");
        return;
    }
    for g in games {
        println!(
            "{}  {}  {}  grades {}-{}  ({} plays)",
            g.id,
            g.title,
            g.subject.label(),
            g.min_grade,
            g.max_grade,
            g.plays
        );
    }
}

fn print_gallery(items: &[MediaItem]) {
    if items.is_empty() {
        println!("Gallery is empty");
        return;
    }
    for m in items {
        println!(
            "{}  {}  {}  uploaded {}",
            m.id,
            m.title,
            m.kind.label(),
            m.uploaded_at.format("%Y-%m-%d")
        );
    }
}

fn print_sign_videos(videos: &[SignVideo]) {
    if videos.is_empty() {
        println!("No sign videos found");
        return;
    }
    for v in videos {
        println!(
            "{}  {}  [{}]  {}s",
            v.id, v.title, v.category, v.duration_seconds
        );
    }
}

fn print_search_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No results");
        return;
    }
    for hit in hits {
        println!("{:>4}  {}  {}", hit.score, hit.kind.label(), hit.title);
    }
}

/// Runs the `watch` command until Ctrl-C
async fn run_watch(
    classrooms: ClassroomClient,
    library: LibraryClient,
    cache: Option<DataCache>,
) {
    let mut handle = RefreshHandle::spawn(RefreshConfig::default(), classrooms, library, cache);
    println!("Watching for updates (Ctrl-C to stop)...");

    loop {
        tokio::select! {
            msg = handle.receiver.recv() => match msg {
                Some(RefreshMessage::ClassroomsUpdated(listing)) => {
                    println!("Classroom listing refreshed ({} rooms)", listing.len());
                }
                Some(RefreshMessage::SignVideosUpdated(videos)) => {
                    println!("Sign-video library refreshed ({} videos)", videos.len());
                }
                Some(RefreshMessage::RefreshError(e)) => {
                    eprintln!("Refresh failed: {}", e);
                }
                Some(RefreshMessage::RefreshStarted) | Some(RefreshMessage::RefreshCompleted) => {}
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await;
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = BackendClient::new(&cli.project, &cli.api_key);
    if let Some(ref url) = cli.backend_url {
        backend = backend.with_base_url(url);
    }

    // One cache instance shared by every client for the process lifetime
    let cache = if cli.no_cache {
        None
    } else {
        Some(DataCache::new())
    };

    let classroom_client = match cache.clone() {
        Some(cache) => ClassroomClient::with_cache(backend.clone(), cache),
        None => ClassroomClient::new(backend.clone()),
    };
    let exam_client = match cache.clone() {
        Some(cache) => ExamClient::with_cache(backend.clone(), cache),
        None => ExamClient::new(backend.clone()),
    };
    let library_client = match cache.clone() {
        Some(cache) => LibraryClient::with_cache(backend.clone(), cache),
        None => LibraryClient::new(backend.clone()),
    };

    match cli.command {
        Command::Classrooms => {
            let classrooms = classroom_client.fetch_classrooms().await?;
            print_classrooms(&classrooms);
        }
        Command::Classroom { id } => {
            let classroom = classroom_client.fetch_classroom(&id).await?;
            print_classrooms(std::slice::from_ref(&classroom));
        }
        Command::Roster { classroom_id } => {
            let roster = classroom_client.fetch_roster(&classroom_id).await?;
            print_roster(&roster);
        }
        Command::Rename { id, name } => {
            let updated = classroom_client.rename_classroom(&id, &name).await?;
            println!("Renamed {} to {}", updated.id, updated.name);
        }
        Command::Exams { classroom_id } => {
            let exams = exam_client.fetch_exams(&classroom_id).await?;
            print_exams(&exams);
        }
        Command::Publish {
            classroom_id,
            exam_id,
        } => {
            let exam = exam_client.publish_exam(&classroom_id, &exam_id).await?;
            println!("Published {} ({})", exam.id, exam.title);
        }
        Command::Games => {
            let games = library_client.fetch_games().await?;
            print_games(&games);
        }
        Command::Gallery { classroom_id } => {
            let gallery = library_client.fetch_gallery(&classroom_id).await?;
            print_gallery(&gallery);
        }
        Command::Signs { category } => {
            let videos = match category {
                Some(category) => {
                    library_client
                        .fetch_sign_videos_in_category(&category)
                        .await?
                }
                None => library_client.fetch_sign_videos().await?,
            };
            print_sign_videos(&videos);
        }
        Command::Search { query, classroom } => {
            let query = search_query(&query)?;
            let search_client = SearchClient::new(library_client);
            let hits = search_client.search(&query, classroom.as_deref()).await?;
            print_search_hits(&hits);
        }
        Command::Watch => {
            run_watch(classroom_client, library_client, cache).await;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
