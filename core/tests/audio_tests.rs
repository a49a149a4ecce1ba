//! Integration tests for audio inputs.

mod fixtures;

use fixtures::box_session;
use glyph_distort::audio::synth::{sine, white_noise};
use glyph_distort::audio::{
    ByteSpectrumAnalyser, ClipCapability, DecodedClip, FeedCapability, Permission, SampleFeed,
};
use glyph_distort::{AudioCapability, AudioError, AudioSnapshot, AudioStream, LoopKind};

const SAMPLE_RATE: u32 = 44100;

#[test]
fn test_louder_input_reads_louder() {
    let mut analyser = ByteSpectrumAnalyser::new(256).unwrap();
    let mut quiet = vec![0u8; analyser.bin_count()];
    let mut loud = vec![0u8; analyser.bin_count()];

    analyser.process(&white_noise(256, 0.01, 7), &mut quiet);
    analyser.reset();
    analyser.process(&white_noise(256, 0.5, 7), &mut loud);

    let quiet = AudioSnapshot::from_bins(&quiet);
    let loud = AudioSnapshot::from_bins(&loud);
    assert!(loud.volume > quiet.volume);
    assert!(loud.bands.iter().zip(&quiet.bands).all(|(l, q)| l >= q));
}

#[tokio::test]
async fn test_feed_stream_bins() {
    let feed = SampleFeed::new(1024);
    let mut capability = FeedCapability::new(feed.clone(), Permission::Granted, 256);
    let mut stream = capability.request().await.unwrap();
    assert_eq!(stream.bin_count(), 128);

    let mut bins = vec![0u8; stream.bin_count()];
    stream.sample_frequencies(&mut bins);
    assert!(bins.iter().all(|&b| b == 0));

    for _ in 0..8 {
        feed.push(&sine(2000.0, SAMPLE_RATE, 256, 0.5));
        stream.sample_frequencies(&mut bins);
    }
    let snapshot = AudioSnapshot::from_bins(&bins);
    assert!(snapshot.volume > 0.0);

    stream.close();
    assert!(!feed.is_active());
    assert!(!feed.push(&[0.1; 16]));
}

#[tokio::test]
async fn test_permission_can_change() {
    let mut capability = FeedCapability::new(SampleFeed::new(256), Permission::Denied, 256);
    assert!(matches!(
        capability.request().await,
        Err(AudioError::PermissionDenied)
    ));
    capability.set_permission(Permission::Granted);
    assert!(capability.request().await.is_ok());
    assert!(capability.feed().is_active());
}

#[tokio::test]
async fn test_invalid_fft_size() {
    let mut capability = FeedCapability::new(SampleFeed::new(256), Permission::Granted, 100);
    assert!(matches!(
        capability.request().await,
        Err(AudioError::InvalidFftSize(100))
    ));
}

#[test]
fn test_clip_drives_session_then_goes_quiet() {
    // A tenth of a second: six ticks of audio
    let clip = DecodedClip::new(sine(440.0, SAMPLE_RATE, 4410, 0.8), SAMPLE_RATE);
    let mut capability = ClipCapability::from_clip(clip, 256);
    let mut session = box_session("HELLO");
    session.select_audio_blocking(&mut capability).unwrap();

    assert!(session.tick());
    assert!(session.heights()[0] > 200.0);

    for _ in 0..200 {
        session.tick();
    }
    // Finished clips read as silence once smoothing has decayed
    assert_eq!(session.active_loop(), Some(LoopKind::Audio));
    assert!(session.heights()[..5].iter().all(|&h| h == 200.0));
}

#[cfg(feature = "clip-input")]
mod decoding {
    use super::*;
    use crate::fixtures::wav_bytes;
    use glyph_distort::audio::decode_clip;
    use tempfile::TempDir;

    #[test]
    fn test_decode_wav() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        let samples = sine(440.0, 22050, 2205, 0.5);
        std::fs::write(&path, wav_bytes(&samples, 22050)).unwrap();

        let clip = decode_clip(&path).unwrap();
        assert_eq!(clip.sample_rate, 22050);
        assert_eq!(clip.samples.len(), samples.len());
        for (decoded, original) in clip.samples.iter().zip(&samples) {
            assert!((decoded - original).abs() < 1e-3);
        }
    }

    #[tokio::test]
    async fn test_clip_capability_opens_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        std::fs::write(&path, wav_bytes(&sine(440.0, SAMPLE_RATE, 4410, 0.5), SAMPLE_RATE))
            .unwrap();

        let mut session = box_session("HI");
        let mut capability = ClipCapability::open(&path, 256);
        session.select_audio(&mut capability).await.unwrap();
        assert!(session.is_audio_enabled());
        assert!(session.tick());
    }

    #[tokio::test]
    async fn test_missing_clip_leaves_audio_disabled() {
        let dir = TempDir::new().unwrap();
        let mut session = box_session("HI");
        let mut capability = ClipCapability::open(dir.path().join("missing.wav"), 256);
        let result = session.select_audio(&mut capability).await;
        assert!(matches!(result, Err(AudioError::Io(_))));
        assert!(!session.is_audio_enabled());
    }
}
