//! Classification tables and messages for each page
//!
//! Every backend code a page can receive is listed here as data. Codes that
//! are missing fall back to the operation's primary field.

use toko_backend::{OperationTable, RemoteErrorMap, codes, ops};
use toko_messages::Level;

/// Operation id for the store profile save.
pub const SAVE_STORE: &str = "saveStore";
/// Operation id for deleting one transaction.
pub const DELETE_TRANSACTION: &str = "deleteTransaction";

pub mod messages {
	pub const SIGNED_IN: &str = "Berhasil Login";
	pub const REGISTERED: &str = "Selamat, Akun Berhasil Terdaftar";
	pub const PROFILE_NAME_UPDATED: &str = "Data Pengguna Berhasil Di Ganti";
	pub const EMAIL_UPDATED: &str = "Email berhasil diperbarui";
	pub const PASSWORD_UPDATED: &str = "Password berhasil diperbarui";
	pub const STORE_SAVED: &str = "Data Toko berhasil di simpan";
	pub const NO_TRANSACTIONS: &str = "Belum ada data transaksi";

	pub fn verification_sent(email: &str) -> String {
		format!("Email verifikasi telah dikirim ke {email}")
	}
}

pub fn login() -> RemoteErrorMap {
	RemoteErrorMap::new().operation(
		ops::SIGN_IN,
		OperationTable::new("email")
			.on_primary(codes::USER_NOT_FOUND, "Email Tidak Terdaftar", Level::Error)
			.on_primary(
				codes::INVALID_EMAIL,
				"Email Tidak Valid, Harap Cek Kembali",
				Level::Warning,
			)
			.map(
				codes::WRONG_PASSWORD,
				"password",
				"Password Salah, Harap Cek Kembali",
				Level::Warning,
			)
			.on_primary(
				codes::USER_DISABLED,
				"Selamat, Akun Pengguna Telah Di Blokir, Karena Menyalahi Aturan Layanan Kami",
				Level::Error,
			),
	)
}

pub fn registration() -> RemoteErrorMap {
	RemoteErrorMap::new().operation(
		ops::REGISTER,
		OperationTable::new("email")
			.on_primary(codes::EMAIL_ALREADY_IN_USE, "Email sudah terdaftar", Level::Error)
			.on_primary(
				codes::INVALID_EMAIL,
				"Email tidak valid, silahkan cek kembali",
				Level::Warning,
			)
			.map(codes::WEAK_PASSWORD, "password", "Password lemah", Level::Warning)
			.on_primary(
				codes::OPERATION_NOT_ALLOWED,
				"Metode email dan password tidak didukung",
				Level::Warning,
			),
	)
}

pub fn account() -> RemoteErrorMap {
	RemoteErrorMap::new()
		.operation(ops::UPDATE_PROFILE_NAME, OperationTable::new("displayName"))
		.operation(
			ops::UPDATE_EMAIL,
			OperationTable::new("email")
				.on_primary(
					codes::EMAIL_ALREADY_IN_USE,
					"Email sudah digunakan oleh pengguna lain",
					Level::Error,
				)
				.on_primary(codes::INVALID_EMAIL, "Email tidak valid", Level::Warning)
				.on_primary(
					codes::REQUIRES_RECENT_LOGIN,
					"Silahkan logout, kemudian login kembali untuk memperbarui email",
					Level::Warning,
				),
		)
		.operation(
			ops::UPDATE_PASSWORD,
			OperationTable::new("password")
				.on_primary(codes::WEAK_PASSWORD, "Password terlalu lemah", Level::Warning)
				.on_primary(
					codes::REQUIRES_RECENT_LOGIN,
					"Silahkan logout, kemudian login kembali untuk memperbarui password",
					Level::Warning,
				),
		)
		.operation(
			ops::SEND_EMAIL_VERIFICATION,
			OperationTable::new("email").on_primary(
				codes::REQUIRES_RECENT_LOGIN,
				"Silahkan logout, kemudian login kembali untuk mengirim email verifikasi",
				Level::Warning,
			),
		)
}

pub fn store() -> RemoteErrorMap {
	RemoteErrorMap::new().operation(
		SAVE_STORE,
		OperationTable::new("nama")
			.on_primary(
				codes::PERMISSION_DENIED,
				"Anda tidak memiliki akses untuk menyimpan data toko",
				Level::Error,
			)
			.on_primary(
				codes::UNAVAILABLE,
				"Server tidak dapat dihubungi, silahkan coba lagi",
				Level::Warning,
			),
	)
}

pub fn transactions() -> RemoteErrorMap {
	RemoteErrorMap::new().operation(
		DELETE_TRANSACTION,
		OperationTable::new(toko_backend::classify::UNKNOWN_OPERATION_FIELD).on_primary(
			codes::PERMISSION_DENIED,
			"Anda tidak memiliki akses untuk menghapus transaksi",
			Level::Error,
		),
	)
}
