// Path: crates/tx/src/abi/writer.rs
//! Little-endian primitive writer and the chain's name and time encodings.

/// Maximum length of an account name.
pub const NAME_MAX_LEN: usize = 13;

/// An append-only buffer of little-endian primitives.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the writer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// LEB128.
    pub fn varuint32(&mut self, mut v: u32) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.buf.push(byte);
                return;
            }
            self.buf.push(byte | 0x80);
        }
    }

    /// Zigzag, then LEB128.
    pub fn varint32(&mut self, v: i32) {
        self.varuint32(((v << 1) ^ (v >> 31)) as u32);
    }

    pub fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// A length prefix followed by the bytes.
    pub fn bytes(&mut self, bytes: &[u8]) -> Result<(), String> {
        let len = u32::try_from(bytes.len()).map_err(|_| format!("{} bytes is too long", bytes.len()))?;
        self.varuint32(len);
        self.raw(bytes);
        Ok(())
    }

    pub fn string(&mut self, s: &str) -> Result<(), String> {
        self.bytes(s.as_bytes())
    }

    pub fn name(&mut self, s: &str) -> Result<(), String> {
        self.u64(name_to_u64(s)?);
        Ok(())
    }
}

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
        b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
        b'.' => Some(0),
        _ => None,
    }
}

/// Packs an account name into its 64-bit form.
///
/// The first twelve characters take five bits each; a thirteenth may only use
/// the low four bits.
pub fn name_to_u64(s: &str) -> Result<u64, String> {
    if s.len() > NAME_MAX_LEN {
        return Err(format!("name '{s}' is longer than {NAME_MAX_LEN} characters"));
    }
    let mut value = 0u64;
    for (i, c) in s.bytes().enumerate() {
        let sym = char_to_symbol(c).ok_or_else(|| format!("invalid character in name '{s}'"))?;
        if i < 12 {
            value |= (sym & 0x1f) << (64 - 5 * (i + 1));
        } else {
            if sym > 0x0f {
                return Err(format!("invalid thirteenth character in name '{s}'"));
            }
            value |= sym;
        }
    }
    Ok(value)
}

fn days_from_civil(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Parses `YYYY-MM-DDTHH:MM:SS`, with optional fractional seconds and `Z`,
/// into seconds since the Unix epoch.
pub fn parse_time_point_sec(s: &str) -> Result<u32, String> {
    let bad = || format!("invalid time '{s}'");
    let s = s.trim().trim_end_matches('Z');
    let (date, time) = s.split_once('T').ok_or_else(bad)?;
    let time = time.split('.').next().unwrap_or(time);

    let num = |part: Option<&str>| -> Result<i64, String> {
        part.and_then(|p| p.parse::<i64>().ok()).ok_or_else(bad)
    };
    let mut d = date.split('-');
    let (year, month, day) = (num(d.next())?, num(d.next())?, num(d.next())?);
    let mut t = time.split(':');
    let (hour, minute, second) = (num(t.next())?, num(t.next())?, num(t.next())?);
    if !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
        || !(0..24).contains(&hour)
        || !(0..60).contains(&minute)
        || !(0..61).contains(&second)
    {
        return Err(bad());
    }
    let secs = days_from_civil(year, month, day) * 86_400 + hour * 3_600 + minute * 60 + second;
    u32::try_from(secs).map_err(|_| bad())
}
