//! Browser media glue.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything that touches files, the clipboard, downloads or audio lives
//! here so pages stay declarative. The ambient player and the voice
//! recorder each hold one live browser handle in a thread-local slot; the
//! UI is single-threaded and never needs more than one of either.
//!
//! TRADE-OFFS
//! ==========
//! SSR builds compile every function as a no-op or an error so components
//! can call them unconditionally from event handlers.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use models::chat::FileData;

/// File name attached to voice recordings.
pub const RECORDING_NAME: &str = "gravacao.webm";
/// Recording type used when the recorder does not report one.
pub const RECORDING_MIME: &str = "audio/webm";
/// Container of synthesized speech returned by the gateway.
pub const SPEECH_MIME: &str = "audio/wav";
pub const JSON_MIME: &str = "application/json";

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
#[cfg(feature = "hydrate")]
use wasm_bindgen_futures::JsFuture;

#[cfg(feature = "hydrate")]
struct ActiveRecording {
    recorder: web_sys::MediaRecorder,
    stream: web_sys::MediaStream,
    chunks: Rc<RefCell<Vec<web_sys::Blob>>>,
    _on_data: Closure<dyn FnMut(web_sys::BlobEvent)>,
}

#[cfg(feature = "hydrate")]
thread_local! {
    static AMBIENT: RefCell<Option<web_sys::HtmlAudioElement>> = const { RefCell::new(None) };
    static RECORDING: RefCell<Option<ActiveRecording>> = const { RefCell::new(None) };
}

/// Milliseconds since the epoch, or 0 outside the browser.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}

#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Base type of a recorder-reported mime, e.g. `audio/webm;codecs=opus` → `audio/webm`.
#[must_use]
pub fn recording_mime(reported: &str) -> &str {
    let base = reported.split(';').next().unwrap_or_default().trim();
    if base.is_empty() { RECORDING_MIME } else { base }
}

#[must_use]
pub fn speech_data_url(audio_base64: &str) -> String {
    models::chat::data_url(SPEECH_MIME, audio_base64)
}

#[cfg(feature = "hydrate")]
fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

#[cfg(feature = "hydrate")]
async fn read_blob_data_url(blob: &web_sys::Blob) -> Result<String, String> {
    let reader = web_sys::FileReader::new().map_err(js_error)?;
    let (tx, rx) = futures::channel::oneshot::channel::<()>();
    let on_load_end = Closure::once(move || {
        let _ = tx.send(());
    });
    reader.set_onloadend(Some(on_load_end.as_ref().unchecked_ref()));
    reader.read_as_data_url(blob).map_err(js_error)?;
    rx.await.map_err(|_| "file read cancelled".to_owned())?;
    drop(on_load_end);
    reader
        .result()
        .map_err(js_error)?
        .as_string()
        .ok_or_else(|| "file read produced no data".to_owned())
}

/// First file chosen in an `<input type="file">` change event.
#[cfg(feature = "hydrate")]
pub fn selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    let input: web_sys::HtmlInputElement = ev.target()?.dyn_into().ok()?;
    input.files()?.get(0)
}

/// Read a chosen file as a `data:` URL.
///
/// # Errors
///
/// Returns an error string when the browser cannot read the file.
#[cfg(feature = "hydrate")]
pub async fn read_file_data_url(file: &web_sys::File) -> Result<String, String> {
    read_blob_data_url(file).await
}

/// Read a chosen file into the base64 upload shape.
///
/// # Errors
///
/// Returns an error string when the file cannot be read or is empty.
#[cfg(feature = "hydrate")]
pub async fn read_file(file: &web_sys::File) -> Result<FileData, String> {
    let url = read_blob_data_url(file).await?;
    FileData::from_data_url(&url, &file.name()).ok_or_else(|| "arquivo vazio".to_owned())
}

/// Put `text` on the clipboard.
///
/// # Errors
///
/// Returns an error string when clipboard access is denied or unavailable.
pub async fn copy_text(text: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        JsFuture::from(window.navigator().clipboard().write_text(text))
            .await
            .map_err(js_error)?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = text;
        Err("not available on server".to_owned())
    }
}

/// Offer `contents` as a file download.
///
/// # Errors
///
/// Returns an error string when the document or object URL is unavailable.
pub fn download_text(file_name: &str, mime: &str, contents: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_owned())?;
        let body = document.body().ok_or_else(|| "no body".to_owned())?;
        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| "anchor cast failed".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        body.append_child(&anchor).map_err(js_error)?;
        anchor.click();
        let _ = body.remove_child(&anchor);
        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (file_name, mime, contents);
        Err("not available on server".to_owned())
    }
}

#[cfg(feature = "hydrate")]
fn start_playback(audio: &web_sys::HtmlAudioElement) {
    match audio.play() {
        Ok(promise) => leptos::task::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("audio playback failed: {}", js_error(e));
            }
        }),
        Err(e) => log::warn!("audio playback failed: {}", js_error(e)),
    }
}

/// Replace the ambient track with `url`, looping at `volume`.
pub fn ambient_play(url: &str, volume: f64) {
    #[cfg(feature = "hydrate")]
    {
        ambient_stop();
        let audio = match web_sys::HtmlAudioElement::new_with_src(url) {
            Ok(audio) => audio,
            Err(e) => {
                log::warn!("ambient audio init failed: {}", js_error(e));
                return;
            }
        };
        audio.set_loop(true);
        audio.set_volume(volume);
        audio.set_cross_origin(Some("anonymous"));
        start_playback(&audio);
        AMBIENT.with(|slot| *slot.borrow_mut() = Some(audio));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, volume);
    }
}

/// Pause or resume the loaded ambient track.
pub fn ambient_set_playing(playing: bool) {
    #[cfg(feature = "hydrate")]
    AMBIENT.with(|slot| {
        if let Some(audio) = slot.borrow().as_ref() {
            if playing {
                start_playback(audio);
            } else {
                let _ = audio.pause();
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = playing;
    }
}

pub fn ambient_set_volume(volume: f64) {
    #[cfg(feature = "hydrate")]
    AMBIENT.with(|slot| {
        if let Some(audio) = slot.borrow().as_ref() {
            audio.set_volume(volume);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = volume;
    }
}

/// Stop and release the ambient track.
pub fn ambient_stop() {
    #[cfg(feature = "hydrate")]
    AMBIENT.with(|slot| {
        if let Some(audio) = slot.borrow_mut().take() {
            let _ = audio.pause();
            audio.set_current_time(0.0);
        }
    });
}

/// Play synthesized speech returned by the gateway.
pub fn play_speech(audio_base64: &str) {
    #[cfg(feature = "hydrate")]
    match web_sys::HtmlAudioElement::new_with_src(&speech_data_url(audio_base64)) {
        Ok(audio) => start_playback(&audio),
        Err(e) => log::warn!("speech playback failed: {}", js_error(e)),
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = audio_base64;
    }
}

/// Release the microphone held by `stream`.
#[cfg(feature = "hydrate")]
fn stop_tracks(stream: &web_sys::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Ask for the microphone and start capturing.
///
/// # Errors
///
/// Returns an error string when permission is denied or recording is unsupported.
pub async fn start_recording() -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        let devices = window.navigator().media_devices().map_err(js_error)?;
        let constraints = web_sys::MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let promise = devices.get_user_media_with_constraints(&constraints).map_err(js_error)?;
        let stream: web_sys::MediaStream = JsFuture::from(promise)
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        let recorder = match web_sys::MediaRecorder::new_with_media_stream(&stream) {
            Ok(recorder) => recorder,
            Err(e) => {
                stop_tracks(&stream);
                return Err(js_error(e));
            }
        };

        let chunks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&chunks);
        let on_data = Closure::<dyn FnMut(web_sys::BlobEvent)>::new(move |ev: web_sys::BlobEvent| {
            if let Some(blob) = ev.data().filter(|b| b.size() > 0.0) {
                sink.borrow_mut().push(blob);
            }
        });
        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
        if let Err(e) = recorder.start() {
            stop_tracks(&stream);
            return Err(js_error(e));
        }

        RECORDING.with(|slot| {
            *slot.borrow_mut() = Some(ActiveRecording { recorder, stream, chunks, _on_data: on_data });
        });
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Stop capturing and return the recording ready for upload.
///
/// # Errors
///
/// Returns an error string when nothing is being recorded or the capture is empty.
pub async fn stop_recording() -> Result<FileData, String> {
    #[cfg(feature = "hydrate")]
    {
        let active = RECORDING
            .with(|slot| slot.borrow_mut().take())
            .ok_or_else(|| "not recording".to_owned())?;

        let (tx, rx) = futures::channel::oneshot::channel::<()>();
        let on_stop = Closure::once(move || {
            let _ = tx.send(());
        });
        active.recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));
        let stopped = match active.recorder.stop() {
            Ok(()) => rx.await.map_err(|_| "recording cancelled".to_owned()),
            Err(e) => Err(js_error(e)),
        };
        drop(on_stop);
        stop_tracks(&active.stream);
        stopped?;

        let mime = recording_mime(&active.recorder.mime_type()).to_owned();
        let parts = js_sys::Array::new();
        for chunk in active.chunks.borrow().iter() {
            parts.push(chunk);
        }
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&mime);
        let blob = web_sys::Blob::new_with_blob_sequence_and_options(&parts, &options).map_err(js_error)?;

        let url = read_blob_data_url(&blob).await?;
        let mut file = FileData::from_data_url(&url, RECORDING_NAME).ok_or_else(|| "gravação vazia".to_owned())?;
        file.mime_type = mime;
        Ok(file)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
