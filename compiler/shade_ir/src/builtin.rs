//! Builtin names recognised by the front end.
//!
//! An identifier that no declaration in scope binds may still name a builtin
//! function, type, value, address space, texel format, access mode or
//! interpolation tag. [`Builtin::classify`] decides which, testing the
//! categories in a fixed order.

use std::fmt;

macro_rules! builtin_enum {
    (
        $(#[$meta:meta])*
        $ty:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum $ty {
            $($variant),+
        }

        impl $ty {
            /// Every member, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Parse from source spelling.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($text => Some($ty::$variant),)+
                    _ => None,
                }
            }

            /// Source spelling.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

builtin_enum! {
    /// Builtin functions.
    BuiltinFunction {
        Abs => "abs",
        Acos => "acos",
        Acosh => "acosh",
        All => "all",
        Any => "any",
        ArrayLength => "arrayLength",
        Asin => "asin",
        Asinh => "asinh",
        Atan => "atan",
        Atan2 => "atan2",
        Atanh => "atanh",
        AtomicAdd => "atomicAdd",
        AtomicAnd => "atomicAnd",
        AtomicCompareExchangeWeak => "atomicCompareExchangeWeak",
        AtomicExchange => "atomicExchange",
        AtomicLoad => "atomicLoad",
        AtomicMax => "atomicMax",
        AtomicMin => "atomicMin",
        AtomicOr => "atomicOr",
        AtomicStore => "atomicStore",
        AtomicSub => "atomicSub",
        AtomicXor => "atomicXor",
        Ceil => "ceil",
        Clamp => "clamp",
        Cos => "cos",
        Cosh => "cosh",
        CountLeadingZeros => "countLeadingZeros",
        CountOneBits => "countOneBits",
        CountTrailingZeros => "countTrailingZeros",
        Cross => "cross",
        Degrees => "degrees",
        Determinant => "determinant",
        Distance => "distance",
        Dot => "dot",
        Dpdx => "dpdx",
        DpdxCoarse => "dpdxCoarse",
        DpdxFine => "dpdxFine",
        Dpdy => "dpdy",
        DpdyCoarse => "dpdyCoarse",
        DpdyFine => "dpdyFine",
        Exp => "exp",
        Exp2 => "exp2",
        ExtractBits => "extractBits",
        FaceForward => "faceForward",
        FirstLeadingBit => "firstLeadingBit",
        FirstTrailingBit => "firstTrailingBit",
        Floor => "floor",
        Fma => "fma",
        Fract => "fract",
        Frexp => "frexp",
        Fwidth => "fwidth",
        FwidthCoarse => "fwidthCoarse",
        FwidthFine => "fwidthFine",
        InsertBits => "insertBits",
        InverseSqrt => "inverseSqrt",
        Ldexp => "ldexp",
        Length => "length",
        Log => "log",
        Log2 => "log2",
        Max => "max",
        Min => "min",
        Mix => "mix",
        Modf => "modf",
        Normalize => "normalize",
        Pack2x16Float => "pack2x16float",
        Pack2x16Snorm => "pack2x16snorm",
        Pack2x16Unorm => "pack2x16unorm",
        Pack4x8Snorm => "pack4x8snorm",
        Pack4x8Unorm => "pack4x8unorm",
        Pow => "pow",
        QuantizeToF16 => "quantizeToF16",
        Radians => "radians",
        Reflect => "reflect",
        Refract => "refract",
        ReverseBits => "reverseBits",
        Round => "round",
        Saturate => "saturate",
        Select => "select",
        Sign => "sign",
        Sin => "sin",
        Sinh => "sinh",
        Smoothstep => "smoothstep",
        Sqrt => "sqrt",
        Step => "step",
        StorageBarrier => "storageBarrier",
        Tan => "tan",
        Tanh => "tanh",
        TextureBarrier => "textureBarrier",
        TextureDimensions => "textureDimensions",
        TextureGather => "textureGather",
        TextureGatherCompare => "textureGatherCompare",
        TextureLoad => "textureLoad",
        TextureNumLayers => "textureNumLayers",
        TextureNumLevels => "textureNumLevels",
        TextureNumSamples => "textureNumSamples",
        TextureSample => "textureSample",
        TextureSampleBias => "textureSampleBias",
        TextureSampleCompare => "textureSampleCompare",
        TextureSampleCompareLevel => "textureSampleCompareLevel",
        TextureSampleGrad => "textureSampleGrad",
        TextureSampleLevel => "textureSampleLevel",
        TextureStore => "textureStore",
        Transpose => "transpose",
        Trunc => "trunc",
        Unpack2x16Float => "unpack2x16float",
        Unpack2x16Snorm => "unpack2x16snorm",
        Unpack2x16Unorm => "unpack2x16unorm",
        Unpack4x8Snorm => "unpack4x8snorm",
        Unpack4x8Unorm => "unpack4x8unorm",
        WorkgroupBarrier => "workgroupBarrier",
        WorkgroupUniformLoad => "workgroupUniformLoad",
    }
}

builtin_enum! {
    /// Builtin types, including type generators such as `vec3` and `array`.
    BuiltinType {
        Bool => "bool",
        I32 => "i32",
        U32 => "u32",
        F32 => "f32",
        F16 => "f16",
        Vec2 => "vec2",
        Vec3 => "vec3",
        Vec4 => "vec4",
        Vec2F => "vec2f",
        Vec3F => "vec3f",
        Vec4F => "vec4f",
        Vec2H => "vec2h",
        Vec3H => "vec3h",
        Vec4H => "vec4h",
        Vec2I => "vec2i",
        Vec3I => "vec3i",
        Vec4I => "vec4i",
        Vec2U => "vec2u",
        Vec3U => "vec3u",
        Vec4U => "vec4u",
        Mat2x2 => "mat2x2",
        Mat2x3 => "mat2x3",
        Mat2x4 => "mat2x4",
        Mat3x2 => "mat3x2",
        Mat3x3 => "mat3x3",
        Mat3x4 => "mat3x4",
        Mat4x2 => "mat4x2",
        Mat4x3 => "mat4x3",
        Mat4x4 => "mat4x4",
        Mat2x2F => "mat2x2f",
        Mat3x3F => "mat3x3f",
        Mat4x4F => "mat4x4f",
        Mat2x2H => "mat2x2h",
        Mat3x3H => "mat3x3h",
        Mat4x4H => "mat4x4h",
        Array => "array",
        Atomic => "atomic",
        Ptr => "ptr",
        Sampler => "sampler",
        SamplerComparison => "sampler_comparison",
        Texture1d => "texture_1d",
        Texture2d => "texture_2d",
        Texture2dArray => "texture_2d_array",
        Texture3d => "texture_3d",
        TextureCube => "texture_cube",
        TextureCubeArray => "texture_cube_array",
        TextureMultisampled2d => "texture_multisampled_2d",
        TextureDepth2d => "texture_depth_2d",
        TextureDepth2dArray => "texture_depth_2d_array",
        TextureDepthCube => "texture_depth_cube",
        TextureDepthCubeArray => "texture_depth_cube_array",
        TextureDepthMultisampled2d => "texture_depth_multisampled_2d",
        TextureExternal => "texture_external",
        TextureStorage1d => "texture_storage_1d",
        TextureStorage2d => "texture_storage_2d",
        TextureStorage2dArray => "texture_storage_2d_array",
        TextureStorage3d => "texture_storage_3d",
    }
}

builtin_enum! {
    /// Values usable in `@builtin(...)`.
    BuiltinValue {
        FragDepth => "frag_depth",
        FrontFacing => "front_facing",
        GlobalInvocationId => "global_invocation_id",
        InstanceIndex => "instance_index",
        LocalInvocationId => "local_invocation_id",
        LocalInvocationIndex => "local_invocation_index",
        NumWorkgroups => "num_workgroups",
        Position => "position",
        SampleIndex => "sample_index",
        SampleMask => "sample_mask",
        VertexIndex => "vertex_index",
        WorkgroupId => "workgroup_id",
    }
}

builtin_enum! {
    /// Address spaces of `var` declarations and pointer types.
    AddressSpace {
        Function => "function",
        Private => "private",
        PushConstant => "push_constant",
        Storage => "storage",
        Uniform => "uniform",
        Workgroup => "workgroup",
    }
}

builtin_enum! {
    /// Storage texture texel formats.
    TexelFormat {
        Bgra8Unorm => "bgra8unorm",
        R32Float => "r32float",
        R32Sint => "r32sint",
        R32Uint => "r32uint",
        Rg32Float => "rg32float",
        Rg32Sint => "rg32sint",
        Rg32Uint => "rg32uint",
        Rgba16Float => "rgba16float",
        Rgba16Sint => "rgba16sint",
        Rgba16Uint => "rgba16uint",
        Rgba32Float => "rgba32float",
        Rgba32Sint => "rgba32sint",
        Rgba32Uint => "rgba32uint",
        Rgba8Sint => "rgba8sint",
        Rgba8Snorm => "rgba8snorm",
        Rgba8Uint => "rgba8uint",
        Rgba8Unorm => "rgba8unorm",
    }
}

builtin_enum! {
    /// Memory access modes.
    Access {
        Read => "read",
        ReadWrite => "read_write",
        Write => "write",
    }
}

builtin_enum! {
    /// `@interpolate` types.
    InterpolationType {
        Flat => "flat",
        Linear => "linear",
        Perspective => "perspective",
    }
}

builtin_enum! {
    /// `@interpolate` sampling modes.
    InterpolationSampling {
        Center => "center",
        Centroid => "centroid",
        Sample => "sample",
    }
}

/// A name classified as a builtin.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    Function(BuiltinFunction),
    Type(BuiltinType),
    Value(BuiltinValue),
    AddressSpace(AddressSpace),
    TexelFormat(TexelFormat),
    Access(Access),
    InterpolationType(InterpolationType),
    InterpolationSampling(InterpolationSampling),
}

impl Builtin {
    /// Classify `name`, or `None` if it is not a builtin of any category.
    pub fn classify(name: &str) -> Option<Builtin> {
        if let Some(f) = BuiltinFunction::from_name(name) {
            return Some(Builtin::Function(f));
        }
        if let Some(t) = BuiltinType::from_name(name) {
            return Some(Builtin::Type(t));
        }
        if let Some(v) = BuiltinValue::from_name(name) {
            return Some(Builtin::Value(v));
        }
        if let Some(a) = AddressSpace::from_name(name) {
            return Some(Builtin::AddressSpace(a));
        }
        if let Some(t) = TexelFormat::from_name(name) {
            return Some(Builtin::TexelFormat(t));
        }
        if let Some(a) = Access::from_name(name) {
            return Some(Builtin::Access(a));
        }
        if let Some(t) = InterpolationType::from_name(name) {
            return Some(Builtin::InterpolationType(t));
        }
        InterpolationSampling::from_name(name).map(Builtin::InterpolationSampling)
    }

    /// Category label used in diagnostics, e.g. `builtin function`.
    pub const fn category(self) -> &'static str {
        match self {
            Builtin::Function(_) => "builtin function",
            Builtin::Type(_) => "builtin type",
            Builtin::Value(_) => "builtin value",
            Builtin::AddressSpace(_) => "address space",
            Builtin::TexelFormat(_) => "texel format",
            Builtin::Access(_) => "access",
            Builtin::InterpolationType(_) => "interpolation type",
            Builtin::InterpolationSampling(_) => "interpolation sampling",
        }
    }

    /// Source spelling of the builtin.
    pub const fn as_str(self) -> &'static str {
        match self {
            Builtin::Function(f) => f.as_str(),
            Builtin::Type(t) => t.as_str(),
            Builtin::Value(v) => v.as_str(),
            Builtin::AddressSpace(a) => a.as_str(),
            Builtin::TexelFormat(t) => t.as_str(),
            Builtin::Access(a) => a.as_str(),
            Builtin::InterpolationType(t) => t.as_str(),
            Builtin::InterpolationSampling(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.category(), self.as_str())
    }
}
