//! 核心类型定义 - 键的哈希能力约定与字节键

use core::fmt;
use std::fmt::{Debug, Display};

/// 键特征 - 提供确定性的整数哈希码
///
/// 同一个键在整个生命周期内必须返回相同的哈希码，且相等的键哈希码相同。
/// 映射只使用这个哈希码乘以每表随机乘数来定位槽位，不依赖 `std::hash::Hash`。
///
/// 若 `K: Borrow<Q>`，则 `K` 与 `Q` 的实现必须一致，否则借用形式的查询会落到错误的槽位。
pub trait Hashable {
    /// 计算哈希码
    fn hash_code(&self) -> i32;
}

macro_rules! impl_hashable_widening {
    ($($t:ty),*) => {
        $(
            impl Hashable for $t {
                #[inline]
                fn hash_code(&self) -> i32 {
                    *self as i32
                }
            }
        )*
    };
}

impl_hashable_widening!(i8, i16, i32, u8, u16, u32);

/// 64位整数折叠高低32位
#[inline]
fn fold_u64(bits: u64) -> i32 {
    (bits ^ (bits >> 32)) as i32
}

impl Hashable for i64 {
    #[inline]
    fn hash_code(&self) -> i32 {
        fold_u64(*self as u64)
    }
}

impl Hashable for u64 {
    #[inline]
    fn hash_code(&self) -> i32 {
        fold_u64(*self)
    }
}

impl Hashable for isize {
    #[inline]
    fn hash_code(&self) -> i32 {
        fold_u64(*self as i64 as u64)
    }
}

impl Hashable for usize {
    #[inline]
    fn hash_code(&self) -> i32 {
        fold_u64(*self as u64)
    }
}

impl Hashable for bool {
    #[inline]
    fn hash_code(&self) -> i32 {
        if *self { 1231 } else { 1237 }
    }
}

impl Hashable for char {
    #[inline]
    fn hash_code(&self) -> i32 {
        *self as i32
    }
}

impl Hashable for str {
    /// 按UTF-16码元计算 `31 * h + c`
    fn hash_code(&self) -> i32 {
        self.encode_utf16()
            .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
    }
}

impl Hashable for String {
    #[inline]
    fn hash_code(&self) -> i32 {
        self.as_str().hash_code()
    }
}

impl<T: Hashable + ?Sized> Hashable for &T {
    #[inline]
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: Hashable + ?Sized> Hashable for Box<T> {
    #[inline]
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

/// 字节键包装类型
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteKey(pub Vec<u8>);

impl ByteKey {
    /// 创建新字节键
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// 获取字节切片
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// 获取内部字节
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<&[u8]> for ByteKey {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Hashable for ByteKey {
    /// 字节按有符号数参与 `31 * h + b`，初值为1
    fn hash_code(&self) -> i32 {
        self.0
            .iter()
            .fold(1i32, |h, &b| h.wrapping_mul(31).wrapping_add(b as i8 as i32))
    }
}

impl Debug for ByteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteKey(")?;
        for byte in &self.0 {
            write!(f, "{:02X}", byte)?;
        }
        write!(f, ")")
    }
}

impl Display for ByteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_hash_code() {
        assert_eq!("".hash_code(), 0);
        assert_eq!("A".hash_code(), 65);
        assert_eq!("ab".hash_code(), 97 * 31 + 98);
        // 经典碰撞对
        assert_eq!("Aa".hash_code(), "BB".hash_code());
        assert_eq!(String::from("hello").hash_code(), "hello".hash_code());
    }

    #[test]
    fn test_string_hash_code_wraps() {
        // 长字符串必然溢出i32，结果仍需确定
        let long = "x".repeat(64);
        assert_eq!(long.hash_code(), long.clone().hash_code());
    }

    #[test]
    fn test_integer_hash_code() {
        assert_eq!(42i32.hash_code(), 42);
        assert_eq!((-7i32).hash_code(), -7);
        assert_eq!(255u8.hash_code(), 255);
        assert_eq!(1u64.hash_code(), 1);
        assert_eq!((1u64 << 32).hash_code(), 1);
        assert_eq!((-1i64).hash_code(), 0);
    }

    #[test]
    fn test_misc_hash_code() {
        assert_eq!(true.hash_code(), 1231);
        assert_eq!(false.hash_code(), 1237);
        assert_eq!('A'.hash_code(), 65);
        let boxed: Box<str> = "A".into();
        assert_eq!(boxed.hash_code(), 65);
        assert_eq!((&&"A").hash_code(), 65);
    }

    #[test]
    fn test_byte_key() {
        let key = ByteKey::new(vec![0x01, 0xFF]);
        assert_eq!(key.hash_code(), (31 + 1) * 31 - 1);
        assert_eq!(ByteKey::new(Vec::new()).hash_code(), 1);
        assert_eq!(format!("{:?}", key), "ByteKey(01FF)");
        assert_eq!(key.to_string(), "01FF");
        assert_eq!(ByteKey::from(&[0x01u8, 0xFF][..]), key);
        assert_eq!(key.into_inner(), vec![0x01, 0xFF]);
    }
}
