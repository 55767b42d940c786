//! 引擎错误类型

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArrangeError {
    /// 句子为空或只有空白
    #[error("句子为空，无法生成排序挑战")]
    EmptySentence,

    /// 位置越界
    #[error("位置 {index} 超出范围（共 {len} 个单词）")]
    IndexOutOfRange { index: usize, len: usize },

    /// 给定排列与原句单词不一致
    #[error("给定排列不是原句单词的重排")]
    NotAPermutation,
}
