//! Control/test gesture capture and comparison
//!
//! Offline capture replays a whole recording and keeps the sampler's last
//! viable sample. Interactive capture streams the recording in the
//! background and takes the sample when the user presses Enter.

use crate::commands::replay_all;
use crate::config::{Config, DeviceConfig};
use crate::device::{Controller, Frame, FrameDevice, Hand, ReplayDevice};
use crate::tracking::{ComparisonReport, HandSampler};
use anyhow::{bail, Context};
use parking_lot::Mutex as ParkingMutex;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Stable hand at the end of a recording, if any
pub fn capture_offline(config: &Config, frames: &[Frame]) -> Option<Hand> {
    let sampler = Arc::new(ParkingMutex::new(HandSampler::new(&config.sampler)));
    replay_all(config, frames, sampler.clone());
    let sample = sampler.lock().sample().cloned();
    sample
}

/// Stream `frames` on a loop and take a sample each time a line is read
/// from `input`, until one is available
pub async fn capture_interactive<R>(
    config: &Config,
    frames: Vec<Frame>,
    prompt: &str,
    input: &mut R,
) -> anyhow::Result<Hand>
where
    R: AsyncBufRead + Unpin,
{
    let controller = Controller::new(config.device.history_capacity);
    capture_from_replay(&controller, config, frames, prompt, input).await
}

async fn capture_from_replay<R>(
    controller: &Controller,
    config: &Config,
    frames: Vec<Frame>,
    prompt: &str,
    input: &mut R,
) -> anyhow::Result<Hand>
where
    R: AsyncBufRead + Unpin,
{
    let sampler = Arc::new(ParkingMutex::new(HandSampler::new(&config.sampler)));
    let listener_id = controller.add_listener(sampler.clone());

    let device_config = DeviceConfig {
        loop_playback: true,
        ..config.device.clone()
    };
    let mut device = ReplayDevice::new(frames, device_config);
    if let Err(e) = device.start(controller.clone()).await {
        controller.remove_listener(listener_id);
        return Err(e.into());
    }

    let captured = wait_for_sample(&sampler, prompt, input).await;

    // Playback and the listener are torn down on every exit path
    controller.remove_listener(listener_id);
    device.stop().await?;

    captured?.context("Input closed before a stable hand was captured")
}

async fn wait_for_sample<R>(
    sampler: &ParkingMutex<HandSampler>,
    prompt: &str,
    input: &mut R,
) -> anyhow::Result<Option<Hand>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    loop {
        println!("{}", prompt);
        line.clear();
        if input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        let sample = sampler.lock().sample().cloned();
        match sample {
            Some(hand) => return Ok(Some(hand)),
            None => tracing::info!("No stable hand yet, try again"),
        }
    }
}

/// Compare the stable hands from two recordings
pub fn compare_offline(
    config: &Config,
    control_frames: &[Frame],
    test_frames: &[Frame],
) -> anyhow::Result<ComparisonReport> {
    let Some(control) = capture_offline(config, control_frames) else {
        bail!("Control recording never settled on a stable hand");
    };
    let Some(test) = capture_offline(config, test_frames) else {
        bail!("Test recording never settled on a stable hand");
    };
    Ok(ComparisonReport::new(control, test))
}

/// Interactive counterpart of `compare_offline`, prompting on stdout
pub async fn compare_interactive<R>(
    config: &Config,
    control_frames: Vec<Frame>,
    test_frames: Vec<Frame>,
    input: &mut R,
) -> anyhow::Result<ComparisonReport>
where
    R: AsyncBufRead + Unpin,
{
    let control = capture_interactive(
        config,
        control_frames,
        "Keep hand still and press Enter to record control hand gesture...",
        input,
    )
    .await?;
    let test = capture_interactive(
        config,
        test_frames,
        "Keep hand still and press Enter to record test hand gesture...",
        input,
    )
    .await?;
    Ok(ComparisonReport::new(control, test))
}

pub fn write_report(path: &Path, report: &ComparisonReport) -> anyhow::Result<()> {
    let data = serde_json::to_vec_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, data)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!("Wrote comparison report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Finger, Vector};
    use std::pin::Pin;
    use std::task::{Context as TaskContext, Poll};
    use std::time::Duration;
    use tokio::io::{AsyncRead, AsyncWriteExt, BufReader, DuplexStream, ReadBuf};

    fn make_frame(id: i64, speed: f32, fingers: usize) -> Frame {
        Frame {
            id,
            timestamp_us: id * 10_000,
            valid: true,
            hands: vec![Hand {
                id: 1,
                palm_position: Vector::new(0.0, 180.0, 0.0),
                palm_velocity: Vector::new(speed, 0.0, 0.0),
                fingers: (0..fingers)
                    .map(|i| Finger {
                        id: i as i32,
                        tip_position: Vector::new(i as f32 * 20.0, 0.0, 0.0),
                        length: 50.0,
                    })
                    .collect(),
            }],
        }
    }

    fn still_recording(fingers: usize) -> Vec<Frame> {
        (0..12).map(|i| make_frame(i, 1.0, fingers)).collect()
    }

    #[test]
    fn test_capture_offline_takes_last_still_hand() {
        let mut frames = still_recording(5);
        frames.push(make_frame(12, 1.0, 3));

        let hand = capture_offline(&Config::default(), &frames).unwrap();
        assert_eq!(hand.fingers.len(), 3);
    }

    #[test]
    fn test_capture_offline_moving_recording() {
        let frames: Vec<Frame> = (0..12).map(|i| make_frame(i, 400.0, 5)).collect();
        assert!(capture_offline(&Config::default(), &frames).is_none());
    }

    #[test]
    fn test_compare_offline() {
        let report =
            compare_offline(&Config::default(), &still_recording(5), &still_recording(2)).unwrap();
        assert_eq!(report.finger_count_difference, 3);
    }

    #[test]
    fn test_compare_offline_reports_unsettled_control() {
        let moving: Vec<Frame> = (0..12).map(|i| make_frame(i, 400.0, 5)).collect();
        let err = compare_offline(&Config::default(), &moving, &still_recording(2)).unwrap_err();
        assert!(err.to_string().contains("Control"));
    }

    struct BrokenInput;

    impl AsyncRead for BrokenInput {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            Poll::Ready(Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "input gone")))
        }
    }

    impl AsyncBufRead for BrokenInput {
        fn poll_fill_buf(
            self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
        ) -> Poll<std::io::Result<&[u8]>> {
            Poll::Ready(Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "input gone")))
        }

        fn consume(self: Pin<&mut Self>, _amt: usize) {}
    }

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.device.frame_interval_ms = 1;
        config
    }

    fn handless_recording() -> Vec<Frame> {
        (0..12)
            .map(|i| Frame {
                id: i,
                timestamp_us: i * 10_000,
                valid: true,
                hands: vec![],
            })
            .collect()
    }

    /// Input that delivers one newline per delay, then closes
    fn delayed_presses(delays_ms: &[u64]) -> BufReader<DuplexStream> {
        let (mut writer, reader) = tokio::io::duplex(64);
        let delays = delays_ms.to_vec();
        tokio::spawn(async move {
            for delay in delays {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                if writer.write_all(b"\n").await.is_err() {
                    return;
                }
            }
        });
        BufReader::new(reader)
    }

    #[tokio::test]
    async fn test_capture_interactive_fails_on_closed_input() {
        let mut input: &[u8] = b"";
        let result =
            capture_interactive(&Config::default(), still_recording(5), "prompt", &mut input).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_capture_interactive_returns_still_hand() {
        let mut input = delayed_presses(&[200]);
        let hand = capture_interactive(&fast_config(), still_recording(4), "prompt", &mut input)
            .await
            .unwrap();
        assert_eq!(hand.fingers.len(), 4);
    }

    #[tokio::test]
    async fn test_capture_interactive_reprompts_without_sample() {
        let controller = Controller::new(60);
        let mut input: &[u8] = b"\n\n";

        let result = capture_from_replay(
            &controller,
            &fast_config(),
            handless_recording(),
            "prompt",
            &mut input,
        )
        .await;

        assert!(result.is_err());
        // Both presses were consumed before giving up
        assert!(input.is_empty());
        assert_eq!(controller.listener_count(), 0);
        assert!(!controller.is_connected());
    }

    #[tokio::test]
    async fn test_capture_interactive_read_error_stops_replay() {
        let controller = Controller::new(60);
        let mut input = BrokenInput;

        let result = capture_from_replay(
            &controller,
            &fast_config(),
            still_recording(5),
            "prompt",
            &mut input,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(controller.listener_count(), 0);
        assert!(!controller.is_connected());
    }

    #[tokio::test]
    async fn test_compare_interactive() {
        let mut input = delayed_presses(&[200, 300]);
        let report = compare_interactive(
            &fast_config(),
            still_recording(5),
            still_recording(3),
            &mut input,
        )
        .await
        .unwrap();

        assert_eq!(report.finger_count_difference, 2);
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report =
            compare_offline(&Config::default(), &still_recording(4), &still_recording(4)).unwrap();

        write_report(&path, &report).unwrap();

        let parsed: ComparisonReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.is_match());
    }
}
