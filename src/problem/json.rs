#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

// Mirror of the canonical problem holding only the user supplied fields.
// Reading goes back through `SdpaFreeFormat::new` so that the data is
// validated again.

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct JsonProblemData<T: FloatT> {
    pub X_blocks: Vec<BlockInX>,
    pub A: Vec<CscMatrix<T>>,
    pub B: CscMatrix<T>,
    pub g: Vec<T>,
    pub C: CscMatrix<T>,
    pub d: Vec<T>,
    pub constant_min_cost_term: T,
    pub prog_var_in_sdpa: Vec<VariableInSdpa<T>>,
}

impl<T> SdpaFreeFormat<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Write the canonical problem to `file` as JSON
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json_data = JsonProblemData {
            X_blocks: self.X_blocks.clone(),
            A: self.A.clone(),
            B: self.B.clone(),
            g: self.g.clone(),
            C: self.C.clone(),
            d: self.d.clone(),
            constant_min_cost_term: self.constant_min_cost_term,
            prog_var_in_sdpa: self.prog_var_in_sdpa.clone(),
        };

        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Read a canonical problem previously written with
    /// [`write_to_file`](Self::write_to_file)
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data: JsonProblemData<T> = serde_json::from_str(&buffer)?;

        Self::new(
            json_data.X_blocks,
            json_data.A,
            json_data.B,
            json_data.g,
            json_data.C,
            json_data.d,
            json_data.constant_min_cost_term,
            json_data.prog_var_in_sdpa,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[test]
fn test_json_io() {
    use std::io::{Seek, SeekFrom};

    let blocks = vec![
        BlockInX::new(BlockType::Matrix, 2),
        BlockInX::new(BlockType::Diagonal, 1),
    ];
    let A0 = CscMatrix::new_from_triplets(3, 3, vec![0, 2], vec![0, 2], vec![1., -1.]);
    let B = CscMatrix::new_from_triplets(1, 1, vec![0], vec![0], vec![2.]);
    let C = CscMatrix::new_from_triplets(3, 3, vec![0, 1], vec![1, 0], vec![0.5, 0.5]);
    let vars = vec![
        VariableInSdpa::InX(DecisionVariableInSdpaX::new(
            Sign::Negative,
            1.,
            EntryInX::new(1, 0, 0),
        )),
        VariableInSdpa::Free(0),
        VariableInSdpa::Constant(4.),
    ];
    let data = SdpaFreeFormat::new(blocks, vec![A0], B, vec![3.], C, vec![1.], 0.25, vars).unwrap();

    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let data2 = SdpaFreeFormat::<f64>::read_from_file(&mut file).unwrap();

    assert_eq!(data.X_blocks(), data2.X_blocks());
    assert_eq!(data.A(), data2.A());
    assert_eq!(data.B(), data2.B());
    assert_eq!(data.C(), data2.C());
    assert_eq!(data.g(), data2.g());
    assert_eq!(data.d(), data2.d());
    assert_eq!(data.constant_min_cost_term(), data2.constant_min_cost_term());
    assert_eq!(data.prog_var_in_sdpa(), data2.prog_var_in_sdpa());
}
