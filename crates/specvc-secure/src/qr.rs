//! QR code rendering of CBOR-LD encoded examples.
use crate::cbor_ld;
use crate::envelope::{Envelope, EnvelopeContext, EnvelopeError, Enveloper, Format};
use async_trait::async_trait;
use base64::engine::general_purpose;
use base64::write::EncoderWriter;
use base64::Engine;
use image::Luma;
use image::{DynamicImage, ImageOutputFormat};
use qrcode::QrCode;
use serde_json::Value;
use specvc_core::example::VcExample;
use specvc_core::text::wrap_columns;

const WRAP_WIDTH: usize = 75;

pub fn image_to_base64_string(image: &DynamicImage) -> Result<String, EnvelopeError> {
    let mut buf = Vec::new();
    {
        let mut writer = EncoderWriter::new(&mut buf, &general_purpose::STANDARD);
        image
            .write_to(&mut writer, ImageOutputFormat::Png)
            .map_err(|e| EnvelopeError::QrImage(e.to_string()))?;
    }
    String::from_utf8(buf).map_err(|e| EnvelopeError::QrImage(e.to_string()))
}

/// Renders an example as a QR code of its CBOR-LD encoding.
pub struct QrEnveloper;

#[async_trait]
impl Enveloper for QrEnveloper {
    fn format(&self) -> Format {
        Format::Qr
    }

    async fn envelope(
        &self,
        _example: &VcExample,
        document: &Value,
        _context: &EnvelopeContext,
    ) -> Result<Envelope, EnvelopeError> {
        let bytes = cbor_ld::encode(document)?;
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(&bytes);

        // Render the bits into an image.
        let code = QrCode::new(payload.as_bytes())?;
        let image = DynamicImage::ImageLuma8(code.render::<Luma<u8>>().build());
        let image_str = image_to_base64_string(&image)?;
        let image_str = format!("data:image/png;base64,{}", image_str);

        let html = format!(
            "<div class=\"vc-qr\">\
             \n<img src=\"{}\" alt=\"QR code of the CBOR-LD encoded document\">\
             \n<pre class=\"vc-qr-text\">{}</pre>\n</div>",
            image_str,
            wrap_columns(&payload, WRAP_WIDTH)
        );
        Ok(Envelope {
            format: Format::Qr,
            label: "QR Code".to_string(),
            raw: payload,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specvc_core::data::TEST_UNSIGNED_VC;
    use specvc_core::keys::ExampleKeyring;

    #[tokio::test]
    async fn test_envelope_qr() {
        let context = EnvelopeContext::new(ExampleKeyring::generate().unwrap());
        let example = VcExample::new(1, TEST_UNSIGNED_VC.to_string());
        let document: Value = example.parse().unwrap();

        let envelope = QrEnveloper
            .envelope(&example, &document, &context)
            .await
            .unwrap();

        assert!(envelope.html.contains("data:image/png;base64,"));
        let decoded = general_purpose::URL_SAFE_NO_PAD
            .decode(&envelope.raw)
            .unwrap();
        assert_eq!(&decoded[..3], &[0xd9, 0x05, 0x00]);
    }
}
