/// Audio returned by the speech endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Sample rate the speech model uses when the mime type does not say
const DEFAULT_SAMPLE_RATE: u32 = 24_000;

impl AudioClip {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    pub fn is_wav(&self) -> bool {
        self.data.len() >= 12 && &self.data[0..4] == b"RIFF" && &self.data[8..12] == b"WAVE"
    }

    /// Raw little-endian 16-bit PCM, e.g. `audio/L16;codec=pcm;rate=24000`
    pub fn is_pcm(&self) -> bool {
        let essence = self
            .mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "audio/l16" || essence == "audio/pcm"
    }

    pub fn sample_rate(&self) -> u32 {
        self.mime_type
            .split(';')
            .filter_map(|param| param.trim().strip_prefix("rate="))
            .find_map(|rate| rate.parse().ok())
            .unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    /// Bytes of a playable WAV file
    pub fn to_wav(&self) -> Vec<u8> {
        if self.is_wav() || !self.is_pcm() {
            return self.data.clone();
        }

        let mut wav = wav_header(self.data.len() as u32, self.sample_rate(), 1, 16);
        wav.extend_from_slice(&self.data);
        wav
    }
}

fn wav_header(data_len: u32, sample_rate: u32, channels: u16, bits_per_sample: u16) -> Vec<u8> {
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = sample_rate * block_align as u32;

    let mut header = Vec::with_capacity(44);
    header.extend_from_slice(b"RIFF");
    header.extend_from_slice(&(36 + data_len).to_le_bytes());
    header.extend_from_slice(b"WAVE");
    header.extend_from_slice(b"fmt ");
    header.extend_from_slice(&16u32.to_le_bytes());
    header.extend_from_slice(&1u16.to_le_bytes()); // PCM
    header.extend_from_slice(&channels.to_le_bytes());
    header.extend_from_slice(&sample_rate.to_le_bytes());
    header.extend_from_slice(&byte_rate.to_le_bytes());
    header.extend_from_slice(&block_align.to_le_bytes());
    header.extend_from_slice(&bits_per_sample.to_le_bytes());
    header.extend_from_slice(b"data");
    header.extend_from_slice(&data_len.to_le_bytes());
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_gets_wav_header() {
        let clip = AudioClip::new(vec![0u8; 8], "audio/L16;codec=pcm;rate=16000");
        assert!(clip.is_pcm());
        assert_eq!(clip.sample_rate(), 16_000);

        let wav = clip.to_wav();
        assert_eq!(wav.len(), 44 + 8);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 36 + 8);
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 16_000);
        assert_eq!(u32::from_le_bytes(wav[28..32].try_into().unwrap()), 32_000);
        assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 8);
        assert!(AudioClip::new(wav, "audio/wav").is_wav());
    }

    #[test]
    fn test_default_rate() {
        let clip = AudioClip::new(vec![], "audio/pcm");
        assert_eq!(clip.sample_rate(), 24_000);
    }

    #[test]
    fn test_wav_and_unknown_pass_through() {
        let wav = AudioClip::new(vec![0u8; 4], "audio/L16").to_wav();
        let clip = AudioClip::new(wav.clone(), "audio/L16;rate=24000");
        assert_eq!(clip.to_wav(), wav);

        let mp3 = AudioClip::new(vec![1, 2, 3], "audio/mpeg");
        assert_eq!(mp3.to_wav(), vec![1, 2, 3]);
    }
}
