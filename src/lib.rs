/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口函数
pub use internal::entrance::download::*;

pub mod auth {
    use crate::internal;
    pub use internal::auth::structs::download_auth::DownloadAuth;
}

/// 对外提供资源探测能力，不限制死在下载器内部，以防有人只想问服务器支不支持 Range
pub mod resource {
    pub mod functions {
        use crate::internal;
        pub use internal::resource::functions::probe::*;
    }

    pub mod structs {
        pub use crate::internal::resource::structs::resource_descriptor::*;
    }

    pub use crate::internal::resource::functions::probe::{probe_resource, ProbeError};
    pub use structs::ResourceDescriptor;
}

pub mod download {
    use crate::internal;
    // 下载器：类型与入口（以 lib 为中心，此处统一导出）
    pub use internal::downloader::structs::*;
    pub use internal::downloader::traits::download::*;
}

pub mod local_file {
    use crate::internal;
    pub use internal::local_file::destination::*;
    pub use internal::local_file::naming::*;
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}
