use std::io::Write;

use serde::ser::{SerializeSeq, SerializeStruct, Serializer};
use serde::Serialize;

use crate::errors::KmerResult;
use crate::KmerReport;

struct KmerList<'r, 'a>(&'r KmerReport<'a>);

impl<'r, 'a> Serialize for KmerList<'r, 'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for kmer in self.0.iter() {
            seq.serialize_element(&kmer)?;
        }
        seq.end()
    }
}

impl<'a> Serialize for KmerReport<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("KmerReport", 6)?;
        state.serialize_field("kmerLength", &self.kmer_length())?;
        state.serialize_field("inputLength", &self.input_length())?;
        state.serialize_field("totalKmers", &self.total_kmers())?;
        state.serialize_field("distinctKmers", &self.distinct_kmers())?;
        state.serialize_field("minCount", &self.min_count())?;
        state.serialize_field("kmers", &KmerList(self))?;
        state.end()
    }
}

/// Write the report as a single JSON object.
pub fn write_json<W: Write + ?Sized>(writer: &mut W, report: &KmerReport) -> KmerResult<()> {
    serde_json::to_writer(&mut *writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
