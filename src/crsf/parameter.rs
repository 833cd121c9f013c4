//! # CRSF Device Parameters
//!
//! Decoding of parameter settings entries and serialization of parameter
//! writes.
//!
//! ## Record Layout
//!
//! ```text
//! parent_folder(1) | type|hidden(1) | name\0 | kind-specific body
//! ```
//!
//! The low 6 bits of the type byte select the [`ParameterKind`]; bit 7 marks
//! the parameter as hidden. Multi-byte integers are big-endian.

use bytes::Buf;

use super::protocol::{frame_type, CrsfFrame};
use crate::error::{CrsfError, Result};

/// Type byte bits holding the data kind
pub const PARAMETER_TYPE_MASK: u8 = 0x3F;

/// Type byte bit marking a parameter hidden from UI
pub const PARAMETER_HIDDEN: u8 = 0x80;

/// Separator between options of a text selection
pub const TEXT_SELECTION_SEPARATOR: char = ';';

/// Command parameter status values
pub mod command_status {
    pub const READY: u8 = 0;
    pub const START: u8 = 1;
    pub const PROGRESS: u8 = 2;
    pub const CONFIRMATION_NEEDED: u8 = 3;
    pub const CONFIRM: u8 = 4;
    pub const CANCEL: u8 = 5;
    pub const POLL: u8 = 6;
}

/// Parameter data kind, from the low 6 bits of the type byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParameterKind {
    Uint8 = 0x00,
    Int8 = 0x01,
    Uint16 = 0x02,
    Int16 = 0x03,
    Uint32 = 0x04,
    Int32 = 0x05,
    Float = 0x08,
    TextSelection = 0x09,
    String = 0x0A,
    Folder = 0x0B,
    Info = 0x0C,
    Command = 0x0D,
}

impl TryFrom<u8> for ParameterKind {
    type Error = CrsfError;

    fn try_from(id: u8) -> Result<Self> {
        let kind = match id {
            0x00 => Self::Uint8,
            0x01 => Self::Int8,
            0x02 => Self::Uint16,
            0x03 => Self::Int16,
            0x04 => Self::Uint32,
            0x05 => Self::Int32,
            0x08 => Self::Float,
            0x09 => Self::TextSelection,
            0x0A => Self::String,
            0x0B => Self::Folder,
            0x0C => Self::Info,
            0x0D => Self::Command,
            other => return Err(CrsfError::UnknownParameterType(other)),
        };
        Ok(kind)
    }
}

impl ParameterKind {
    /// Whether values of this kind can be written back to the device
    pub fn is_writable(self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Int8 | Self::TextSelection | Self::Command
        )
    }
}

/// Integer parameter: value, limits and default share one width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericParam<T> {
    pub value: T,
    pub min: T,
    pub max: T,
    pub default: T,
    pub unit: String,
}

/// Fixed-point parameter
///
/// Raw integers are scaled by `10^decimal_point`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatParam {
    pub value: i32,
    pub min: i32,
    pub max: i32,
    pub default: i32,
    pub decimal_point: u8,
    pub step_size: i32,
    pub unit: String,
}

impl FloatParam {
    /// Current value with the decimal point applied
    pub fn scaled_value(&self) -> f64 {
        self.scale(self.value)
    }

    /// Apply the decimal point to a raw value of this parameter
    pub fn scale(&self, raw: i32) -> f64 {
        f64::from(raw) / 10f64.powi(i32::from(self.decimal_point))
    }
}

/// Choice among `;`-separated options; `value` indexes `options`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSelection {
    pub options: Vec<String>,
    pub value: u8,
    pub min: u8,
    pub max: u8,
    pub default: u8,
    pub unit: String,
}

impl TextSelection {
    /// Label of the currently selected option
    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.value as usize).map(String::as_str)
    }
}

/// Free text parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringParam {
    pub value: String,
    pub max_length: u8,
}

/// Executable command (bind, wifi update, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParam {
    pub status: u8,
    pub timeout: u8,
    pub info: String,
}

/// Kind-specific body of a parameter record
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Uint8(NumericParam<u8>),
    Int8(NumericParam<i8>),
    Uint16(NumericParam<u16>),
    Int16(NumericParam<i16>),
    Uint32(NumericParam<u32>),
    Int32(NumericParam<i32>),
    Float(FloatParam),
    TextSelection(TextSelection),
    String(StringParam),
    /// Child parameter ids
    Folder(Vec<u8>),
    /// Read-only informational text
    Info(String),
    Command(CommandParam),
}

impl ParameterValue {
    /// Data kind of this value
    pub fn kind(&self) -> ParameterKind {
        match self {
            Self::Uint8(_) => ParameterKind::Uint8,
            Self::Int8(_) => ParameterKind::Int8,
            Self::Uint16(_) => ParameterKind::Uint16,
            Self::Int16(_) => ParameterKind::Int16,
            Self::Uint32(_) => ParameterKind::Uint32,
            Self::Int32(_) => ParameterKind::Int32,
            Self::Float(_) => ParameterKind::Float,
            Self::TextSelection(_) => ParameterKind::TextSelection,
            Self::String(_) => ParameterKind::String,
            Self::Folder(_) => ParameterKind::Folder,
            Self::Info(_) => ParameterKind::Info,
            Self::Command(_) => ParameterKind::Command,
        }
    }

    /// Decode the body of a `kind` parameter starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`CrsfError::Incomplete`] if a fixed-width field runs past the
    /// end of `data`.
    pub fn decode(kind: ParameterKind, data: &[u8], offset: usize) -> Result<Self> {
        let mut reader = FieldReader::at(data, offset);

        let value = match kind {
            ParameterKind::Uint8 => Self::Uint8(reader.numeric()?),
            ParameterKind::Int8 => Self::Int8(reader.numeric()?),
            ParameterKind::Uint16 => Self::Uint16(reader.numeric()?),
            ParameterKind::Int16 => Self::Int16(reader.numeric()?),
            ParameterKind::Uint32 => Self::Uint32(reader.numeric()?),
            ParameterKind::Int32 => Self::Int32(reader.numeric()?),
            ParameterKind::Float => Self::Float(FloatParam {
                value: reader.int()?,
                min: reader.int()?,
                max: reader.int()?,
                default: reader.int()?,
                decimal_point: reader.int()?,
                step_size: reader.int()?,
                unit: reader.string(),
            }),
            ParameterKind::TextSelection => {
                let options = reader
                    .string()
                    .split(TEXT_SELECTION_SEPARATOR)
                    .map(str::to_owned)
                    .collect();
                Self::TextSelection(TextSelection {
                    options,
                    value: reader.int()?,
                    min: reader.int()?,
                    max: reader.int()?,
                    default: reader.int()?,
                    unit: reader.string(),
                })
            }
            ParameterKind::String => Self::String(StringParam {
                value: reader.string(),
                max_length: reader.int()?,
            }),
            ParameterKind::Folder => Self::Folder(reader.children()),
            ParameterKind::Info => Self::Info(reader.string()),
            ParameterKind::Command => Self::Command(CommandParam {
                status: reader.int()?,
                timeout: reader.int()?,
                info: reader.string(),
            }),
        };

        Ok(value)
    }

    /// Serialize the value for a parameter write
    ///
    /// Only UINT8, INT8, TEXT_SELECTION and COMMAND are writable.
    ///
    /// # Errors
    ///
    /// Returns [`CrsfError::ReadOnlyParameter`] for every other kind.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        match self {
            Self::Uint8(param) => Ok(vec![param.value]),
            Self::Int8(param) => Ok(vec![param.value as u8]),
            Self::TextSelection(selection) => Ok(vec![selection.value]),
            Self::Command(command) => {
                let mut bytes = Vec::with_capacity(command.info.len() + 3);
                bytes.push(command.status);
                bytes.push(command.timeout);
                bytes.extend_from_slice(command.info.as_bytes());
                bytes.push(0);
                Ok(bytes)
            }
            other => Err(CrsfError::ReadOnlyParameter(other.kind())),
        }
    }
}

/// One decoded parameter settings record
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    /// Id of the folder parameter containing this one
    pub parent_folder: u8,

    /// UI visibility hint, carried through untouched
    pub hidden: bool,

    pub name: String,

    pub value: ParameterValue,
}

impl ParameterRecord {
    /// Decode a record: header (parent folder, type byte, name) then body
    ///
    /// # Errors
    ///
    /// Returns [`CrsfError::Incomplete`] for truncated records and
    /// [`CrsfError::UnknownParameterType`] for unknown kinds.
    ///
    /// # Examples
    ///
    /// ```
    /// use crsf_link::crsf::parameter::{ParameterKind, ParameterRecord};
    ///
    /// let bytes = [0x00, 0x00, b'P', b'w', b'r', 0x00, 10, 0, 50, 25, b'm', b'W', 0x00];
    /// let record = ParameterRecord::decode(&bytes)?;
    /// assert_eq!(record.name, "Pwr");
    /// assert_eq!(record.kind(), ParameterKind::Uint8);
    /// # Ok::<(), crsf_link::error::CrsfError>(())
    /// ```
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::at(data, 0);

        let parent_folder: u8 = reader.int()?;
        let type_byte: u8 = reader.int()?;
        let kind = ParameterKind::try_from(type_byte & PARAMETER_TYPE_MASK)?;
        let hidden = type_byte & PARAMETER_HIDDEN != 0;
        let name = reader.string();

        let value = ParameterValue::decode(kind, data, reader.offset)?;

        Ok(Self {
            parent_folder,
            hidden,
            name,
            value,
        })
    }

    pub fn kind(&self) -> ParameterKind {
        self.value.kind()
    }
}

/// Payload of a parameter settings entry frame
///
/// ```text
/// field_index(1) | chunks_remaining(1) | record
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub field_index: u8,

    /// Chunks still to be requested after this one
    pub chunks_remaining: u8,

    pub record: ParameterRecord,
}

impl ParameterEntry {
    /// Decode a parameter settings entry frame
    ///
    /// # Errors
    ///
    /// Returns [`CrsfError::UnexpectedFrameType`] for other frame types and
    /// record decode errors otherwise.
    pub fn from_frame(frame: &CrsfFrame) -> Result<Self> {
        if frame.frame_type != frame_type::PARAMETER_SETTINGS_ENTRY {
            return Err(CrsfError::UnexpectedFrameType {
                expected: frame_type::PARAMETER_SETTINGS_ENTRY,
                actual: frame.frame_type,
            });
        }

        Self::decode(&frame.payload)
    }

    /// Decode an entry payload
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::at(payload, 0);
        let field_index = reader.int()?;
        let chunks_remaining = reader.int()?;

        Ok(Self {
            field_index,
            chunks_remaining,
            record: ParameterRecord::decode(&payload[reader.offset..])?,
        })
    }
}

/// Big-endian fixed-width integer field
trait WireInt: Sized {
    const WIDTH: usize;

    fn read(buf: &mut &[u8]) -> Self;
}

macro_rules! impl_wire_int {
    ($($ty:ty => $get:ident),* $(,)?) => {
        $(
            impl WireInt for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn read(buf: &mut &[u8]) -> Self {
                    buf.$get()
                }
            }
        )*
    };
}

impl_wire_int! {
    u8 => get_u8,
    i8 => get_i8,
    u16 => get_u16,
    i16 => get_i16,
    u32 => get_u32,
    i32 => get_i32,
}

/// Cursor over a record body
struct FieldReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    fn at(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            offset: offset.min(data.len()),
        }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    fn int<T: WireInt>(&mut self) -> Result<T> {
        let mut field = self.remaining();
        if field.len() < T::WIDTH {
            return Err(CrsfError::Incomplete {
                needed: T::WIDTH,
                available: field.len(),
            });
        }

        let value = T::read(&mut field);
        self.offset += T::WIDTH;
        Ok(value)
    }

    /// value, min, max, default, then unit
    fn numeric<T: WireInt>(&mut self) -> Result<NumericParam<T>> {
        Ok(NumericParam {
            value: self.int()?,
            min: self.int()?,
            max: self.int()?,
            default: self.int()?,
            unit: self.string(),
        })
    }

    /// Null-terminated string; runs to the end of data when unterminated
    fn string(&mut self) -> String {
        let rest = self.remaining();
        let (text, consumed) = match rest.iter().position(|&b| b == 0) {
            Some(nul) => (&rest[..nul], nul + 1),
            None => (rest, rest.len()),
        };

        self.offset += consumed;
        String::from_utf8_lossy(text).into_owned()
    }

    /// Remaining bytes except the trailing terminator
    fn children(&mut self) -> Vec<u8> {
        let rest = self.remaining();
        let children = rest[..rest.len().saturating_sub(1)].to_vec();
        self.offset = self.data.len();
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_bytes(parent: u8, type_byte: u8, name: &str, body: &[u8]) -> Vec<u8> {
        let mut bytes = vec![parent, type_byte];
        bytes.extend_from_slice(name.as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn test_kind_from_type_id() {
        assert_eq!(ParameterKind::try_from(0x00).unwrap(), ParameterKind::Uint8);
        assert_eq!(ParameterKind::try_from(0x0D).unwrap(), ParameterKind::Command);
        assert!(matches!(
            ParameterKind::try_from(0x06),
            Err(CrsfError::UnknownParameterType(0x06))
        ));
        assert!(matches!(
            ParameterKind::try_from(0x0E),
            Err(CrsfError::UnknownParameterType(0x0E))
        ));
    }

    #[test]
    fn test_decode_header_and_hidden_flag() {
        let bytes = record_bytes(3, 0x80 | 0x0C, "Version", b"3.4.0\0");
        let record = ParameterRecord::decode(&bytes).unwrap();

        assert_eq!(record.parent_folder, 3);
        assert!(record.hidden);
        assert_eq!(record.name, "Version");
        assert_eq!(record.value, ParameterValue::Info("3.4.0".into()));
    }

    #[test]
    fn test_decode_uint8() {
        let bytes = record_bytes(0, 0x00, "Rate", &[4, 0, 7, 2, b'H', b'z', 0]);
        let record = ParameterRecord::decode(&bytes).unwrap();

        assert!(!record.hidden);
        assert_eq!(
            record.value,
            ParameterValue::Uint8(NumericParam {
                value: 4,
                min: 0,
                max: 7,
                default: 2,
                unit: "Hz".into(),
            })
        );
    }

    #[test]
    fn test_uint8_value_reserializes() {
        let bytes = record_bytes(0, 0x00, "Rate", &[0xA5, 0, 0xFF, 1, b'x', 0]);
        let record = ParameterRecord::decode(&bytes).unwrap();
        assert_eq!(record.value.serialize().unwrap(), vec![0xA5]);
    }

    #[test]
    fn test_decode_int8_is_twos_complement() {
        let bytes = record_bytes(0, 0x01, "Trim", &[0xFB, 0x80, 0x7F, 0x00, 0]);
        let record = ParameterRecord::decode(&bytes).unwrap();

        match &record.value {
            ParameterValue::Int8(param) => {
                assert_eq!(param.value, -5);
                assert_eq!(param.min, -128);
                assert_eq!(param.max, 127);
                assert_eq!(param.unit, "");
            }
            other => panic!("Expected Int8, got: {:?}", other),
        }
        assert_eq!(record.value.serialize().unwrap(), vec![0xFB]);
    }

    #[test]
    fn test_decode_uint16_big_endian() {
        let body = [0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x10, b'm', b's', 0];
        let record = ParameterRecord::decode(&record_bytes(0, 0x02, "T", &body)).unwrap();

        assert_eq!(
            record.value,
            ParameterValue::Uint16(NumericParam {
                value: 256,
                min: 0,
                max: 65535,
                default: 16,
                unit: "ms".into(),
            })
        );
    }

    #[test]
    fn test_decode_int16() {
        let body = [0xFF, 0xFE, 0x80, 0x00, 0x7F, 0xFF, 0x00, 0x00, 0];
        let record = ParameterRecord::decode(&record_bytes(0, 0x03, "T", &body)).unwrap();

        match record.value {
            ParameterValue::Int16(param) => {
                assert_eq!(param.value, -2);
                assert_eq!(param.min, i16::MIN);
                assert_eq!(param.max, i16::MAX);
            }
            other => panic!("Expected Int16, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_uint32_and_int32() {
        let mut body = Vec::new();
        for v in [100_000u32, 0, u32::MAX, 1] {
            body.extend_from_slice(&v.to_be_bytes());
        }
        body.push(0);
        let record = ParameterRecord::decode(&record_bytes(0, 0x04, "U", &body)).unwrap();
        assert!(matches!(
            record.value,
            ParameterValue::Uint32(NumericParam { value: 100_000, max: u32::MAX, .. })
        ));

        let mut body = Vec::new();
        for v in [-7i32, i32::MIN, i32::MAX, 0] {
            body.extend_from_slice(&v.to_be_bytes());
        }
        body.extend_from_slice(b"dB\0");
        let record = ParameterRecord::decode(&record_bytes(0, 0x05, "S", &body)).unwrap();
        assert_eq!(
            record.value,
            ParameterValue::Int32(NumericParam {
                value: -7,
                min: i32::MIN,
                max: i32::MAX,
                default: 0,
                unit: "dB".into(),
            })
        );
    }

    #[test]
    fn test_decode_float() {
        let mut body = Vec::new();
        for v in [1250i32, -1000, 5000, 0] {
            body.extend_from_slice(&v.to_be_bytes());
        }
        body.push(2); // decimal point
        body.extend_from_slice(&5i32.to_be_bytes());
        body.extend_from_slice(b"V\0");

        let record = ParameterRecord::decode(&record_bytes(1, 0x08, "Vbat", &body)).unwrap();
        match &record.value {
            ParameterValue::Float(param) => {
                assert_eq!(param.value, 1250);
                assert_eq!(param.min, -1000);
                assert_eq!(param.decimal_point, 2);
                assert_eq!(param.step_size, 5);
                assert_eq!(param.unit, "V");
                assert!((param.scaled_value() - 12.5).abs() < 1e-9);
            }
            other => panic!("Expected Float, got: {:?}", other),
        }
        assert!(matches!(
            record.value.serialize(),
            Err(CrsfError::ReadOnlyParameter(ParameterKind::Float))
        ));
    }

    #[test]
    fn test_decode_text_selection() {
        let mut body = b"25mW;50mW;100mW\0".to_vec();
        body.extend_from_slice(&[1, 0, 2, 0]);
        body.extend_from_slice(b"mW\0");

        let record = ParameterRecord::decode(&record_bytes(2, 0x09, "Power", &body)).unwrap();
        match &record.value {
            ParameterValue::TextSelection(selection) => {
                assert_eq!(selection.options, vec!["25mW", "50mW", "100mW"]);
                assert_eq!(selection.value, 1);
                assert_eq!(selection.max, 2);
                assert_eq!(selection.selected(), Some("50mW"));
                assert_eq!(selection.unit, "mW");
            }
            other => panic!("Expected TextSelection, got: {:?}", other),
        }
        assert_eq!(record.value.serialize().unwrap(), vec![1]);
    }

    #[test]
    fn test_decode_string() {
        let record =
            ParameterRecord::decode(&record_bytes(0, 0x0A, "Phrase", b"secret\0\x20")).unwrap();
        assert_eq!(
            record.value,
            ParameterValue::String(StringParam {
                value: "secret".into(),
                max_length: 32,
            })
        );
    }

    #[test]
    fn test_decode_string_missing_max_length() {
        let result = ParameterRecord::decode(&record_bytes(0, 0x0A, "Phrase", b"secret\0"));
        assert!(matches!(result, Err(CrsfError::Incomplete { needed: 1, available: 0 })));
    }

    #[test]
    fn test_decode_folder() {
        let record =
            ParameterRecord::decode(&record_bytes(0, 0x0B, "TX Power", &[5, 6, 7, 0xFF])).unwrap();
        assert_eq!(record.value, ParameterValue::Folder(vec![5, 6, 7]));
    }

    #[test]
    fn test_decode_empty_folder() {
        let record = ParameterRecord::decode(&record_bytes(0, 0x0B, "Empty", &[])).unwrap();
        assert_eq!(record.value, ParameterValue::Folder(vec![]));
    }

    #[test]
    fn test_decode_command() {
        let body = [command_status::READY, 200, b'G', b'o', 0];
        let record = ParameterRecord::decode(&record_bytes(0, 0x0D, "Bind", &body)).unwrap();

        let expected = CommandParam {
            status: command_status::READY,
            timeout: 200,
            info: "Go".into(),
        };
        assert_eq!(record.value, ParameterValue::Command(expected));
        assert_eq!(
            record.value.serialize().unwrap(),
            vec![command_status::READY, 200, b'G', b'o', 0]
        );
    }

    #[test]
    fn test_unterminated_trailing_string_runs_to_end() {
        let record = ParameterRecord::decode(&record_bytes(0, 0x0C, "Info", b"abc")).unwrap();
        assert_eq!(record.value, ParameterValue::Info("abc".into()));
    }

    #[test]
    fn test_unterminated_name_is_incomplete() {
        let bytes = [0x00, 0x00, b'R', b'a', b't', b'e'];
        let result = ParameterRecord::decode(&bytes);
        assert!(matches!(result, Err(CrsfError::Incomplete { .. })));
    }

    #[test]
    fn test_truncated_integer_fields() {
        let result = ParameterRecord::decode(&record_bytes(0, 0x04, "U", &[0, 0, 0, 1, 0, 0]));
        assert!(matches!(result, Err(CrsfError::Incomplete { needed: 4, available: 2 })));

        let result = ParameterRecord::decode(&[0x00]);
        assert!(matches!(result, Err(CrsfError::Incomplete { .. })));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = ParameterRecord::decode(&record_bytes(0, 0x07, "X", &[0; 8]));
        assert!(matches!(result, Err(CrsfError::UnknownParameterType(0x07))));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let record =
            ParameterRecord::decode(&record_bytes(0, 0x0C, "Info", &[0xFF, b'a', 0])).unwrap();
        assert_eq!(record.value, ParameterValue::Info("\u{FFFD}a".into()));
    }

    #[test]
    fn test_read_only_kinds() {
        let folder = ParameterValue::Folder(vec![1]);
        assert!(matches!(
            folder.serialize(),
            Err(CrsfError::ReadOnlyParameter(ParameterKind::Folder))
        ));
        assert!(!ParameterKind::Uint16.is_writable());
        assert!(ParameterKind::Command.is_writable());
    }

    #[test]
    fn test_entry_from_frame() {
        let mut payload = vec![12, 0];
        payload.extend(record_bytes(0, 0x09, "Mode", b"A;B\0\x00\x00\x01\x00\0"));
        let frame = CrsfFrame::addressed(frame_type::PARAMETER_SETTINGS_ENTRY, 0xEA, 0xEE, payload)
            .unwrap();

        let entry = ParameterEntry::from_frame(&frame).unwrap();
        assert_eq!(entry.field_index, 12);
        assert_eq!(entry.chunks_remaining, 0);
        assert_eq!(entry.record.name, "Mode");
        assert_eq!(entry.record.kind(), ParameterKind::TextSelection);
    }

    #[test]
    fn test_entry_from_wrong_frame_type() {
        let frame = CrsfFrame::addressed(frame_type::DEVICE_INFO, 0xEA, 0xEE, vec![0; 8]).unwrap();
        assert!(matches!(
            ParameterEntry::from_frame(&frame),
            Err(CrsfError::UnexpectedFrameType { .. })
        ));
    }
}
