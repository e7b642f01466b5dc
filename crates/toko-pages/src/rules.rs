//! Validation rules for each page

use toko_forms::ValidationRules;

pub fn login() -> ValidationRules {
	ValidationRules::new()
		.field("email", |f| f.required("Email wajib diisi").email("Email tidak valid"))
		.field("password", |f| f.required("Password wajib diisi"))
}

pub fn registration() -> ValidationRules {
	ValidationRules::new()
		.field("email", |f| f.required("Email wajib di isi").email("Email tidak valid"))
		.field("password", |f| f.required("Password wajib di isi"))
		.field("ulangi_password", |f| {
			f.required("Ulangi Password wajib di isi")
				.same_as("password", "Ulangi Password tidak sama dengan Password")
		})
}

pub fn account() -> ValidationRules {
	ValidationRules::new()
		.field("displayName", |f| f.required("Nama wajib diisi"))
		.field("email", |f| f.required("Email wajib diisi").email("Email tidak valid"))
		.field("password", |f| f.required("Password wajib diisi"))
}

pub fn store() -> ValidationRules {
	ValidationRules::new()
		.field("nama", |f| f.required("Nama wajib diisi"))
		.field("alamat", |f| f.required("Alamat wajib diisi"))
		.field("telepon", |f| f.required("Telepon wajib diisi"))
		.field("website", |f| f.required("Website wajib diisi").url("Website tidak valid"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use toko_forms::{FieldSet, validate};

	#[rstest]
	fn test_login_empty_fields() {
		let fields = FieldSet::new(["email", "password"]);

		let errors = validate(&fields, &login());

		assert_eq!(errors.message("email"), "Email wajib diisi");
		assert_eq!(errors.message("password"), "Password wajib diisi");
	}

	#[rstest]
	fn test_login_malformed_email() {
		let fields = FieldSet::from_pairs([("email", "not-an-email"), ("password", "x")]);

		let errors = validate(&fields, &login());

		assert_eq!(errors.message("email"), "Email tidak valid");
		assert_eq!(errors.message("password"), "");
	}

	#[rstest]
	#[case("", "Ulangi Password wajib di isi")]
	#[case("rahasia2", "Ulangi Password tidak sama dengan Password")]
	#[case("rahasia", "")]
	fn test_registration_confirmation(#[case] confirmation: &str, #[case] expected: &str) {
		let fields = FieldSet::from_pairs([
			("email", "budi@tokoku.id"),
			("password", "rahasia"),
			("ulangi_password", confirmation),
		]);

		let errors = validate(&fields, &registration());

		assert_eq!(errors.message("ulangi_password"), expected);
	}

	#[rstest]
	#[case("tokoku.id", "")]
	#[case("https://www.tokoku.id/profil", "")]
	#[case("bukan website", "Website tidak valid")]
	#[case("", "Website wajib diisi")]
	fn test_store_website(#[case] website: &str, #[case] expected: &str) {
		let fields = FieldSet::from_pairs([
			("nama", "Toko"),
			("alamat", "Jl. Merdeka 1"),
			("telepon", "0812"),
			("website", website),
		]);

		let errors = validate(&fields, &store());

		assert_eq!(errors.message("website"), expected);
	}
}
