
use std::collections::HashMap;
use std::io;

use crate::pipeline::SourceLoader;
use crate::ucd::UnicodeData;

/// A small excerpt of `UnicodeData.txt` covering case pairs, titlecase
/// digraphs, numeric values, a range marker and font variants.
pub(crate) const SAMPLE_UCD: &str = "\
0031;DIGIT ONE;Nd;0;EN;;1;1;1;N;;;;;
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
0044;LATIN CAPITAL LETTER D;Lu;0;L;;;;;N;;;;0064;
0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;0041
0064;LATIN SMALL LETTER D;Ll;0;L;;;;;N;;;0044;;0044
00BD;VULGAR FRACTION ONE HALF;No;0;ON;<fraction> 0031 2044 0032;;;1/2;N;FRACTION ONE HALF;;;;
00C6;LATIN CAPITAL LETTER AE;Lu;0;L;;;;;N;LATIN CAPITAL LETTER A E;;;00E6;
00E6;LATIN SMALL LETTER AE;Ll;0;L;;;;;N;LATIN SMALL LETTER A E;;00C6;;00C6
01C4;LATIN CAPITAL LETTER DZ WITH CARON;Lu;0;L;<compat> 0044 017D;;;;N;LATIN CAPITAL LETTER D Z HACEK;;;01C6;01C5
01C5;LATIN CAPITAL LETTER D WITH SMALL LETTER Z WITH CARON;Lt;0;L;<compat> 0044 017E;;;;N;LATIN LETTER CAPITAL D SMALL Z HACEK;;01C4;01C6;01C5
01C6;LATIN SMALL LETTER DZ WITH CARON;Ll;0;L;<compat> 0064 017E;;;;N;LATIN SMALL LETTER D Z HACEK;;01C4;;01C5
03A9;GREEK CAPITAL LETTER OMEGA;Lu;0;L;;;;;N;;;;03C9;
03C9;GREEK SMALL LETTER OMEGA;Ll;0;L;;;;;N;;;03A9;;03A9
0F33;TIBETAN DIGIT HALF ZERO;No;0;L;;;;-1/2;N;;;;;
216B;ROMAN NUMERAL TWELVE;Nl;0;L;<compat> 216A 0049;;;12;N;;;;217B;
217B;SMALL ROMAN NUMERAL TWELVE;Nl;0;L;<compat> 2179 0069;;;12;N;;;216B;;216B
4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;
1D400;MATHEMATICAL BOLD CAPITAL A;Lu;0;L;<font> 0041;;;;N;;;;;
1D41A;MATHEMATICAL BOLD SMALL A;Ll;0;L;<font> 0061;;;;N;;;;;
1D6C0;MATHEMATICAL BOLD CAPITAL OMEGA;Lu;0;L;<font> 03A9;;;;N;;;;;
";

pub(crate) fn sample_ucd() -> UnicodeData {
    UnicodeData::parse(SAMPLE_UCD).unwrap()
}

/// Rule sources served from memory.
#[derive(Default)]
pub(crate) struct MemoryLoader {
    files: HashMap<String, String>,
}

impl MemoryLoader {
    pub(crate) fn with(mut self, name: &str, content: &str) -> Self {
        self.files.insert(name.to_string(), content.to_string());
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, file: &str) -> io::Result<String> {
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, file.to_string()))
    }
}
