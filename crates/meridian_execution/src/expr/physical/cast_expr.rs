use std::sync::Arc;

use meridian_array::array::Array;
use meridian_array::batch::Batch;
use meridian_array::compute::cast::cast_array;
use meridian_array::datatype::DataType;
use meridian_error::Result;

use super::PhysicalScalarExpression;

#[derive(Debug, Clone)]
pub struct PhysicalCastExpr {
    pub to: DataType,
    pub expr: Box<PhysicalScalarExpression>,
}

impl PhysicalCastExpr {
    pub fn eval(&self, batch: &Batch) -> Result<Arc<Array>> {
        let input = self.expr.eval(batch)?;
        let out = cast_array(&input, &self.to)?;
        Ok(Arc::new(out))
    }
}
