use clap::Parser;

use crate::error::CountError;
use crate::models::{CountRequest, Video};

/// Counts the ballots of a voting and stores the result on the voting.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (required) The name of the voting to count.
    #[clap(long, value_parser)]
    pub name: Option<String>,

    /// A message stored verbatim in the result.
    #[clap(long, value_parser)]
    pub message: Option<String>,

    /// The name of the winning voting option. Only needed if the voting is undecided.
    #[clap(long, value_parser)]
    pub winner: Option<String>,

    /// (url) HLS stream of the result video. Required together with --mp4.
    #[clap(long, value_parser)]
    pub hls: Option<String>,

    /// (url) MP4 file of the result video. Required together with --hls.
    #[clap(long, value_parser)]
    pub mp4: Option<String>,

    /// (url, optional) YouTube link of the result video.
    #[clap(long, value_parser)]
    pub youtube: Option<String>,

    /// (url, optional) Subtitles of the result video.
    #[clap(long, value_parser)]
    pub subtitles: Option<String>,

    /// (url, optional) Poster image of the result video.
    #[clap(long, value_parser)]
    pub poster: Option<String>,

    /// Don't freeze turnout and stats into the result.
    #[clap(long, takes_value = false)]
    pub no_freeze: bool,

    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

/// Process exit code for input clap rejects. Help and version output is
/// not an error.
pub fn exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() { 1 } else { 0 }
}

// Empty values count as not given
fn given(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<Args> for CountRequest {
    type Error = CountError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let name = given(args.name).ok_or(CountError::MissingName)?;

        let hls = given(args.hls);
        let mp4 = given(args.mp4);
        let youtube = given(args.youtube);
        let subtitles = given(args.subtitles);
        let poster = given(args.poster);

        let any_video = hls.is_some()
            || mp4.is_some()
            || youtube.is_some()
            || subtitles.is_some()
            || poster.is_some();
        let video = if any_video {
            match (hls, mp4) {
                (Some(hls), Some(mp4)) => Some(Video {
                    hls,
                    mp4,
                    youtube,
                    subtitles,
                    poster,
                }),
                _ => return Err(CountError::IncompleteVideo),
            }
        } else {
            None
        };

        Ok(CountRequest {
            name,
            // stored verbatim, even when empty
            message: args.message,
            winner: given(args.winner),
            video,
            freeze: !args.no_freeze,
        })
    }
}
