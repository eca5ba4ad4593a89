use std::io::Cursor;

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Output(String),
    #[error("audio sink failed: {0}")]
    Sink(String),
    #[error("cry could not be decoded: {0}")]
    Decode(String),
}

/// Plays an encoded cry to completion. Blocks the calling thread.
pub fn play_cry(bytes: Vec<u8>) -> Result<(), AudioError> {
    let cursor = Cursor::new(bytes);
    let (_stream, handle) =
        rodio::OutputStream::try_default().map_err(|err| AudioError::Output(err.to_string()))?;
    let sink = rodio::Sink::try_new(&handle).map_err(|err| AudioError::Sink(err.to_string()))?;
    let source = rodio::Decoder::new(cursor).map_err(|err| AudioError::Decode(err.to_string()))?;
    sink.append(source);
    sink.sleep_until_end();
    tracing::debug!("cry finished");
    Ok(())
}
