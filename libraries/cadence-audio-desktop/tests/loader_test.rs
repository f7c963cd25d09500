//! Download, decode and resample pipeline against a mock song host
//!
//! None of these tests need an audio device.

use cadence_audio_desktop::loader::{download, prepare};
use cadence_audio_desktop::AudioError;
use std::f32::consts::PI;
use std::io::Cursor;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 16-bit WAV with a 440 Hz tone
fn sine_wav(sample_rate: u32, channels: u16, seconds: f32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        let frames = (sample_rate as f32 * seconds) as usize;
        for i in 0..frames {
            let t = i as f32 / sample_rate as f32;
            let sample = ((2.0 * PI * 440.0 * t).sin() * 0.3 * f32::from(i16::MAX)) as i16;
            for _ in 0..channels {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

async fn serve(body: Vec<u8>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/songs/tone.wav"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_download_and_prepare_stereo() {
    let server = serve(sine_wav(44_100, 2, 0.5)).await;
    let url = format!("{}/songs/tone.wav", server.uri());

    let client = reqwest::Client::new();
    let bytes = download(&client, &url).await.unwrap();
    let audio = prepare(bytes, &url, 44_100).unwrap();

    assert_eq!(audio.sample_rate, 44_100);
    assert_eq!(audio.frames(), 22_050);
    assert!(audio.samples.iter().any(|s| s.abs() > 0.1));
}

#[tokio::test]
async fn test_mono_is_widened_and_resampled() {
    let server = serve(sine_wav(22_050, 1, 1.0)).await;
    let url = format!("{}/songs/tone.wav", server.uri());

    let client = reqwest::Client::new();
    let bytes = download(&client, &url).await.unwrap();
    let audio = prepare(bytes, &url, 48_000).unwrap();

    assert_eq!(audio.sample_rate, 48_000);
    let frames = audio.frames() as i64;
    assert!((frames - 48_000).abs() < 500, "got {frames} frames");
    assert_eq!(audio.samples.len() % 2, 0);
}

#[tokio::test]
async fn test_http_error_is_download_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = download(&client, &format!("{}/songs/missing.mp3", server.uri())).await;

    match result {
        Err(AudioError::Download(message)) => assert!(message.contains("404"), "got {message}"),
        other => panic!("Expected download error, got {:?}", other.map(|b| b.len())),
    }
}

#[tokio::test]
async fn test_non_audio_body_is_decode_error() {
    let server = serve(b"<html>not a song</html>".to_vec()).await;
    let url = format!("{}/songs/tone.wav", server.uri());

    let client = reqwest::Client::new();
    let bytes = download(&client, &url).await.unwrap();

    assert!(matches!(prepare(bytes, &url, 48_000), Err(AudioError::Decode(_))));
}
